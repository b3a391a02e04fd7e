//! Server-rendered reading page.

use crate::loader::PageContext;
use chouraqui_core::crossref::{BOOK_GROUPS, group_for_book};
use chouraqui_core::labels::{french_chapter_label, hebrew_chapter_label};
use chouraqui_core::links::{chapter_options, reader_url, verse_anchor};
use chouraqui_core::markup::{escape_html, format_verse_html};
use chouraqui_core::model::VerseRef;
use std::fmt::Write;

const PLACEHOLDER: &str = "—";

const STYLE: &str = r#"
body { font-family: Georgia, serif; background: #fdfaf3; color: #3b2f1e; margin: 0; }
main { max-width: 1100px; margin: 0 auto; padding: 1.5rem; }
header.labels { display: flex; gap: 1.5rem; align-items: baseline; }
header.labels .hebrew { flex: 1; text-align: right; font-size: 1.5rem; }
header.labels .french { flex: 1; }
nav.selectors form { display: flex; flex-wrap: wrap; gap: .5rem; }
.verse-row { display: flex; gap: 1.5rem; padding: .4rem .6rem; border-radius: .4rem; }
.verse-row.selected { background: #f6e7c1; }
.verse-row .number { min-width: 2rem; color: #a27b3c; }
.verse-row .french, .verse-row .hebrew { flex: 1; margin: 0; }
.verse-row .hebrew { text-align: right; font-size: 1.25rem; }
nav.verse-nav { display: flex; justify-content: space-between; margin-top: 1rem; }
.tetragram { display: inline-flex; vertical-align: middle; line-height: 1; }
.tetragram__letters { display: inline-flex; align-items: center; }
.tetragram__middle { display: inline-flex; flex-direction: column; align-items: center; }
.tetragram__adonai { font-size: .55em; }
.tetragram__letter--tall { font-size: 1.4em; }
"#;

pub fn render_page(context: &PageContext) -> String {
    let position = context.position;
    let has_hebrew = context.book.has_secondary_text;
    let french_label = french_chapter_label(
        context.book.book_number,
        &context.book.long_name,
        position.chapter,
    );
    let hebrew_label = hebrew_chapter_label(context.book.book_number, position.chapter)
        .map(|label| format!(r#"<div class="hebrew" dir="rtl">{}</div>"#, escape_html(&label)))
        .unwrap_or_default();

    let mut rows = String::new();
    for verse in &context.seed.primary_verses {
        let selected = if verse.verse == position.verse {
            " selected"
        } else {
            ""
        };
        let hebrew = if has_hebrew {
            let text = context
                .seed
                .secondary_text(verse.verse)
                .map(escape_html)
                .unwrap_or_else(|| PLACEHOLDER.to_string());
            format!(r#"<p class="hebrew" dir="rtl">{text}</p>"#)
        } else {
            String::new()
        };
        let _ = write!(
            rows,
            r#"<div class="verse-row{selected}" id="{anchor}"><span class="number">{number}</span><p class="french">{french}</p>{hebrew}</div>"#,
            anchor = verse_anchor(verse.verse),
            number = verse.verse,
            french = format_verse_html(&verse.text),
        );
        rows.push('\n');
    }

    let previous = nav_link(context.adjacency.previous(), "← Verset précédent");
    let next = nav_link(context.adjacency.next(), "Verset suivant →");
    let prev_chapter = (position.chapter > 1).then(|| {
        nav_link(
            Some(VerseRef::new(position.book, position.chapter - 1, 1)),
            "Chapitre précédent",
        )
    });
    let next_chapter = (position.chapter < context.max_chapter).then(|| {
        nav_link(
            Some(VerseRef::new(position.book, position.chapter + 1, 1)),
            "Chapitre suivant",
        )
    });

    format!(
        r#"<!DOCTYPE html>
<html lang="fr">
  <head>
    <meta charset="utf-8" />
    <meta name="viewport" content="width=device-width, initial-scale=1" />
    <title>{title}</title>
    <style>{style}</style>
  </head>
  <body>
    <main>
      <nav class="selectors">{selectors}</nav>
      <header class="labels">{hebrew_label}<div class="french">{french_label}</div></header>
      {prev_chapter}
      <section class="verses">
{rows}      </section>
      {next_chapter}
      <nav class="verse-nav">{previous}{next}</nav>
    </main>
  </body>
</html>"#,
        title = escape_html(&french_label),
        style = STYLE,
        selectors = render_selectors(context),
        french_label = escape_html(&french_label),
        prev_chapter = prev_chapter.unwrap_or_default(),
        next_chapter = next_chapter.unwrap_or_default(),
    )
}

pub fn render_empty_page() -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="fr">
  <head><meta charset="utf-8" /><title>Chouraqui</title><style>{STYLE}</style></head>
  <body><main><p>Aucun livre disponible.</p></main></body>
</html>"#
    )
}

fn nav_link(target: Option<VerseRef>, label: &str) -> String {
    match target {
        Some(target) => format!(
            r#"<a class="nav-link" href="{}">{label}</a>"#,
            escape_html(&reader_url(target))
        ),
        None => format!(r#"<span class="nav-link disabled">{label}</span>"#),
    }
}

fn option(value: &str, label: &str, selected: bool) -> String {
    format!(
        r#"<option value="{}"{}>{}</option>"#,
        escape_html(value),
        if selected { " selected" } else { "" },
        escape_html(label)
    )
}

fn render_selectors(context: &PageContext) -> String {
    let position = context.position;

    let groups: String = BOOK_GROUPS
        .iter()
        .map(|group| option(group.key, group.label, group.key == context.group.key))
        .collect();
    let books: String = context
        .books
        .iter()
        .filter(|book| group_for_book(book.book_number).key == context.group.key)
        .map(|book| {
            option(
                &book.book_number.to_string(),
                &book.long_name,
                book.book_number == position.book,
            )
        })
        .collect();
    let chapters: String = chapter_options(context.max_chapter)
        .into_iter()
        .map(|chapter| {
            option(
                &chapter.to_string(),
                &chapter.to_string(),
                chapter == position.chapter,
            )
        })
        .collect();
    let verses: String = context
        .seed
        .primary_verses
        .iter()
        .map(|verse| {
            option(
                &verse.verse.to_string(),
                &verse.verse.to_string(),
                verse.verse == position.verse,
            )
        })
        .collect();

    format!(
        r#"<form method="get" action="/">
  <select name="group" onchange="this.form.book.selectedIndex=-1;this.form.submit()">{groups}</select>
  <select name="book" onchange="this.form.submit()">{books}</select>
  <select name="chapter" onchange="this.form.submit()">{chapters}</select>
  <select name="verse" onchange="this.form.submit()">{verses}</select>
  <noscript><button type="submit">Lire</button></noscript>
</form>"#
    )
}
