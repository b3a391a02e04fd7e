use super::layout::{
    CHAPTER_SEPARATOR_PX, CHAPTER_SPACING_PX, COLUMN_GAP_PX, COLUMN_PADDING_PX, LINE_SPACING,
    STATUS_ROW_PX, VERSE_PADDING_PX, VERSE_SPACING_PX,
};
use super::messages::Message;
use super::state::{
    App, GroupOption, HEADER_FONT_SIZE_PX, MISSING_SECONDARY_GLYPH, READER_SCROLL_ID,
    STATUS_FONT_SIZE_PX, VERSE_NUMBER_FONT_SIZE_PX, book_options, group_options,
};
use chouraqui_core::crossref::has_secondary_text;
use chouraqui_core::gematria::to_hebrew_numeral;
use chouraqui_core::links::chapter_options;
use chouraqui_core::markup::{Segment, french_typography, segments};
use chouraqui_core::model::{ChapterData, Verse, VerseRef};
use chouraqui_core::window::GrowDirection;
use iced::alignment::{Horizontal, Vertical};
use iced::font::Weight;
use iced::widget::text::{LineHeight, Rich, Shaping, Span, Wrapping};
use iced::widget::{
    Column, button, column, container, horizontal_rule, horizontal_space, mouse_area, pick_list,
    row, scrollable, text,
};
use iced::{Background, Border, Color, Element, Font, Length, Theme};

const ACCENT: Color = Color::from_rgba(0.573, 0.251, 0.055, 0.8);
const DAY_SELECTED: Color = Color::from_rgb(0.996, 0.953, 0.78);
const NIGHT_SELECTED: Color = Color::from_rgb(0.27, 0.22, 0.08);

impl App {
    pub fn view(&self) -> Element<'_, Message> {
        let mut content: Column<'_, Message> = column![self.toolbar(), self.chapter_header()]
            .padding(16)
            .spacing(12)
            .height(Length::Fill);

        if self.loading {
            content = content.push(text("Chargement...").size(STATUS_FONT_SIZE_PX));
        }
        if let Some(error) = &self.error {
            content = content.push(
                text(format!("Impossible de charger ce passage : {error}"))
                    .size(STATUS_FONT_SIZE_PX)
                    .color(Color::from_rgb(0.7, 0.1, 0.1)),
            );
        }

        content
            .push(self.reader_scroll())
            .push(self.verse_navigation())
            .into()
    }

    fn toolbar(&self) -> Element<'_, Message> {
        let group_picker = pick_list(
            group_options(&self.context.books),
            Some(GroupOption(self.context.group)),
            Message::GroupSelected,
        )
        .placeholder("Section");

        let books = book_options(&self.context.books, self.context.group);
        let selected_book = books
            .iter()
            .find(|option| option.number == self.window.book())
            .cloned();
        let book_picker = pick_list(books, selected_book, Message::BookSelected).placeholder("Livre");

        let chapter_picker = pick_list(
            chapter_options(self.window.max_chapter()),
            Some(self.selection.position.chapter),
            Message::ChapterSelected,
        )
        .placeholder("Chapitre");

        let verses: Vec<u32> = self
            .window
            .chapter(self.selection.position.chapter)
            .map(|chapter| (1..=chapter.max_verse()).collect())
            .unwrap_or_default();
        let verse_picker = pick_list(
            verses,
            Some(self.selection.position.verse),
            Message::VerseSelected,
        )
        .placeholder("Verset");

        let back = button("←").on_press_maybe(self.history.can_go_back().then_some(Message::HistoryBack));
        let forward = button("→")
            .on_press_maybe(self.history.can_go_forward().then_some(Message::HistoryForward));
        let theme_toggle = button(if self.is_night() { "Jour" } else { "Nuit" }).on_press(Message::ToggleTheme);

        row![
            group_picker,
            book_picker,
            chapter_picker,
            verse_picker,
            horizontal_space(),
            back,
            forward,
            theme_toggle
        ]
        .spacing(10)
        .align_y(Vertical::Center)
        .width(Length::Fill)
        .into()
    }

    fn chapter_header(&self) -> Element<'_, Message> {
        let french = text(self.french_header()).size(HEADER_FONT_SIZE_PX);
        let hebrew = text(self.hebrew_header().unwrap_or_default())
            .size(HEADER_FONT_SIZE_PX)
            .shaping(Shaping::Advanced);
        row![french, horizontal_space(), hebrew]
            .align_y(Vertical::Center)
            .width(Length::Fill)
            .into()
    }

    fn reader_scroll(&self) -> Element<'_, Message> {
        let mut chapters: Column<'_, Message> = Column::new()
            .width(Length::Fill)
            .padding([0, COLUMN_PADDING_PX as u16])
            .push(self.status_row(GrowDirection::Backward));
        for (idx, chapter) in self.window.chapters().enumerate() {
            chapters = chapters.push(self.chapter_view(idx, chapter));
        }
        chapters = chapters.push(self.status_row(GrowDirection::Forward));

        scrollable(chapters)
            .id(READER_SCROLL_ID.clone())
            .on_scroll(|viewport| Message::Scrolled {
                scroll_top: viewport.absolute_offset().y,
                viewport_width: viewport.bounds().width,
                viewport_height: viewport.bounds().height,
                content_height: viewport.content_bounds().height,
            })
            .height(Length::Fill)
            .into()
    }

    /// Placeholder at either end of the window; shows progress while that
    /// direction is loading.
    fn status_row(&self, direction: GrowDirection) -> Element<'_, Message> {
        let label = if self.window.is_growing(direction) {
            "Chargement..."
        } else {
            ""
        };
        container(text(label).size(STATUS_FONT_SIZE_PX).color(ACCENT))
            .width(Length::Fill)
            .height(Length::Fixed(STATUS_ROW_PX))
            .align_x(Horizontal::Center)
            .align_y(Vertical::Center)
            .into()
    }

    fn chapter_view<'a>(&'a self, idx: usize, chapter: &'a ChapterData) -> Element<'a, Message> {
        let mut verses: Column<'a, Message> = Column::new()
            .spacing(VERSE_SPACING_PX)
            .padding(iced::Padding {
                bottom: CHAPTER_SPACING_PX,
                ..iced::Padding::ZERO
            });

        if idx > 0 {
            let separator = row![
                horizontal_rule(1),
                text(format!("{} {}", self.context.book.long_name, chapter.chapter))
                    .size(STATUS_FONT_SIZE_PX)
                    .color(ACCENT),
                horizontal_rule(1)
            ]
            .spacing(16)
            .align_y(Vertical::Center);
            verses = verses.push(
                container(separator)
                    .height(Length::Fixed(CHAPTER_SEPARATOR_PX - VERSE_SPACING_PX))
                    .align_y(Vertical::Center),
            );
        }

        for verse in &chapter.primary_verses {
            verses = verses.push(self.verse_row(chapter, verse));
        }
        verses.into()
    }

    fn verse_row<'a>(&'a self, chapter: &'a ChapterData, verse: &'a Verse) -> Element<'a, Message> {
        let position = VerseRef::new(self.window.book(), chapter.chapter, verse.verse);
        let selected = position == self.selection.position;
        let night = self.is_night();
        let french = self.french_text(verse);

        let body: Element<'a, Message> = if has_secondary_text(self.window.book()) {
            let hebrew = self.hebrew_text(verse.verse, chapter.secondary_text(verse.verse));
            if self.two_columns() {
                row![hebrew, french].spacing(COLUMN_GAP_PX).into()
            } else {
                column![french, hebrew].spacing(4).into()
            }
        } else {
            french
        };

        let framed = container(body)
            .padding(VERSE_PADDING_PX)
            .width(Length::Fill)
            .style(move |_theme: &Theme| verse_row_style(selected, night));
        mouse_area(framed)
            .on_press(Message::VerseClicked(position))
            .into()
    }

    fn french_text<'a>(&self, verse: &'a Verse) -> Element<'a, Message> {
        let size = self.config.font_size as f32;
        let line_height = LineHeight::Relative(LINE_SPACING);
        let typeset = french_typography(&verse.text);

        let mut spans: Vec<Span<'a, Message>> = vec![
            Span::new(format!("{} ", verse.verse))
                .size(VERSE_NUMBER_FONT_SIZE_PX)
                .line_height(line_height)
                .color(ACCENT),
        ];
        for segment in segments(&typeset) {
            let span = match segment {
                Segment::Text(fragment) => Span::new(fragment.to_string()),
                Segment::Tetragram => Span::new("IHVH")
                    .font(Font {
                        weight: Weight::Bold,
                        ..Font::DEFAULT
                    })
                    .color(ACCENT),
            };
            spans.push(span.size(size).line_height(line_height));
        }

        let rich: Rich<'a, Message> = Rich::with_spans(spans);
        rich.width(Length::FillPortion(1))
            .wrapping(Wrapping::Word)
            .align_x(Horizontal::Left)
            .into()
    }

    fn hebrew_text<'a>(&self, verse: u32, scripture: Option<&'a str>) -> Element<'a, Message> {
        let size = self.config.hebrew_font_size as f32;
        let line_height = LineHeight::Relative(LINE_SPACING);
        let spans: Vec<Span<'a, Message>> = vec![
            Span::new(format!("{} ", to_hebrew_numeral(verse)))
                .size(VERSE_NUMBER_FONT_SIZE_PX + 3.0)
                .line_height(line_height)
                .color(ACCENT),
            Span::new(scripture.unwrap_or(MISSING_SECONDARY_GLYPH))
                .size(size)
                .line_height(line_height),
        ];
        let rich: Rich<'a, Message> = Rich::with_spans(spans);
        rich.width(Length::FillPortion(1))
            .wrapping(Wrapping::Word)
            .align_x(Horizontal::Right)
            .into()
    }

    fn verse_navigation(&self) -> Element<'_, Message> {
        let adjacency = self.selection.adjacency();
        let previous = button("Verset précédent").on_press_maybe(
            adjacency
                .and_then(|adjacency| adjacency.previous())
                .map(|_| Message::PreviousVerse),
        );
        let next = button("Verset suivant").on_press_maybe(
            adjacency
                .and_then(|adjacency| adjacency.next())
                .map(|_| Message::NextVerse),
        );
        let position = self.selection.position;
        let label = text(format!(
            "{} {}:{}",
            self.context.book.short_name, position.chapter, position.verse
        ));

        row![previous, horizontal_space(), label, horizontal_space(), next]
            .spacing(10)
            .align_y(Vertical::Center)
            .width(Length::Fill)
            .into()
    }
}

fn verse_row_style(selected: bool, night: bool) -> container::Style {
    if !selected {
        return container::Style::default();
    }
    let background = if night { NIGHT_SELECTED } else { DAY_SELECTED };
    container::Style {
        background: Some(Background::Color(background)),
        border: Border {
            radius: 8.0.into(),
            ..Border::default()
        },
        ..container::Style::default()
    }
}
