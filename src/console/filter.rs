//! Client-side search and exact-match filters over loaded lists

use std::fmt;
use std::str::FromStr;

/// Fields a free-text search looks at
pub trait Searchable {
    fn search_fields(&self) -> Vec<&str>;

    fn matches_search(&self, term: &str) -> bool {
        let term = term.trim().to_lowercase();
        term.is_empty()
            || self
                .search_fields()
                .iter()
                .any(|field| field.to_lowercase().contains(&term))
    }
}

/// An exact-match dropdown filter; `All` matches everything
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Choice<V> {
    #[default]
    All,
    Only(V),
}

impl<V: PartialEq> Choice<V> {
    pub fn matches(&self, value: &V) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => wanted == value,
        }
    }

    pub fn as_option(&self) -> Option<&V> {
        match self {
            Self::All => None,
            Self::Only(value) => Some(value),
        }
    }
}

impl<V: FromStr> FromStr for Choice<V> {
    type Err = V::Err;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() || s.eq_ignore_ascii_case("all") {
            Ok(Self::All)
        } else {
            s.parse().map(Self::Only)
        }
    }
}

impl<V: fmt::Display> fmt::Display for Choice<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("all"),
            Self::Only(value) => fmt::Display::fmt(value, f),
        }
    }
}

/// Items matching `term` and `predicate`, in their original order
pub fn filter_items<'a, T: Searchable>(
    items: &'a [T],
    term: &str,
    predicate: impl Fn(&T) -> bool,
) -> Vec<&'a T> {
    items
        .iter()
        .filter(|item| item.matches_search(term) && predicate(item))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Row(&'static str, &'static str);

    impl Searchable for Row {
        fn search_fields(&self) -> Vec<&str> {
            vec![self.0, self.1]
        }
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let rows = [Row("Harbour Bakery", "Cape Town"), Row("Mill Foods", "Durban")];
        let found = filter_items(&rows, "  harBOUR ", |_| true);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].0, "Harbour Bakery");
        assert_eq!(filter_items(&rows, "durban", |_| true)[0].0, "Mill Foods");
    }

    #[test]
    fn test_choice_parsing() {
        assert_eq!("all".parse::<Choice<u32>>().unwrap(), Choice::All);
        assert_eq!("".parse::<Choice<u32>>().unwrap(), Choice::All);
        assert_eq!("4".parse::<Choice<u32>>().unwrap(), Choice::Only(4));
        assert!(Choice::Only(4).matches(&4));
        assert!(!Choice::Only(4).matches(&5));
        assert!(Choice::<u32>::All.matches(&5));
    }
}
