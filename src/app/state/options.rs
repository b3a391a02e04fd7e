use chouraqui_core::crossref::{BOOK_GROUPS, BookGroup, common_french_name, group_for_book};
use chouraqui_core::model::{Book, BookNumber};
use std::fmt;

/// Entry of the group selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupOption(pub &'static BookGroup);

impl fmt::Display for GroupOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.label)
    }
}

/// Entry of the book selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookOption {
    pub number: BookNumber,
    pub label: String,
}

impl BookOption {
    pub(crate) fn from_book(book: &Book) -> Self {
        let label = match common_french_name(book.book_number) {
            Some(common) => format!("{common} ({})", book.long_name),
            None => book.long_name.clone(),
        };
        Self {
            number: book.book_number,
            label,
        }
    }
}

impl fmt::Display for BookOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label)
    }
}

/// Groups that hold at least one of `books`, in canonical order.
pub(crate) fn group_options(books: &[Book]) -> Vec<GroupOption> {
    BOOK_GROUPS
        .iter()
        .filter(|group| {
            books
                .iter()
                .any(|book| group_for_book(book.book_number).key == group.key)
        })
        .map(GroupOption)
        .collect()
}

pub(crate) fn book_options(books: &[Book], group: &BookGroup) -> Vec<BookOption> {
    books
        .iter()
        .filter(|book| group_for_book(book.book_number).key == group.key)
        .map(BookOption::from_book)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn book(number: BookNumber, long_name: &str) -> Book {
        Book {
            book_number: number,
            short_name: long_name.chars().take(3).collect(),
            long_name: long_name.to_string(),
            book_color: "#ccccff".to_string(),
            has_secondary_text: number < 470,
        }
    }

    #[test]
    fn only_groups_with_books_are_offered() {
        let books = [book(10, "Entête"), book(470, "Matyah")];
        let groups = group_options(&books);
        let keys: Vec<_> = groups.iter().map(|g| g.0.key).collect();
        assert_eq!(keys, ["torah", "nouveau-testament"]);
        assert_eq!(groups[0].to_string(), "Torah");
    }

    #[test]
    fn book_labels_lead_with_the_common_name() {
        let books = [book(10, "Entête"), book(20, "Noms"), book(470, "Matyah")];
        let torah = book_options(&books, &BOOK_GROUPS[0]);
        assert_eq!(torah.len(), 2);
        assert_eq!(torah[0].to_string(), "Genèse (Entête)");
    }
}
