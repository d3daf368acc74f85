// Copyright (C) 2020-2026 Andy Kurnia.

// Plumbing errors (word lists, json questions, racks that the supply cannot
// cover). Search-level rejections are not errors, they just drop candidates.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    Usage,
    WordList,
    Layout,
    Position,
    Supply,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            ErrorKind::Usage => "usage",
            ErrorKind::WordList => "word list",
            ErrorKind::Layout => "layout",
            ErrorKind::Position => "position",
            ErrorKind::Supply => "supply",
        })
    }
}

pub struct WordlaneError {
    kind: ErrorKind,
    s: String,
}

impl WordlaneError {
    #[inline(always)]
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }
}

impl std::fmt::Display for WordlaneError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.kind, self.s)
    }
}

impl std::fmt::Debug for WordlaneError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        (self as &dyn std::fmt::Display).fmt(f)
    }
}

impl std::error::Error for WordlaneError {}

pub fn new(kind: ErrorKind, s: String) -> WordlaneError {
    WordlaneError { kind, s }
}

// None if err did not come from here.
pub fn kind_of(err: &BoxAnyError) -> Option<ErrorKind> {
    err.downcast_ref::<WordlaneError>().map(|e| e.kind())
}

pub type BoxAnyError = Box<dyn std::error::Error + Send + Sync>;
pub type Returns<T> = Result<T, BoxAnyError>;

// return_error!(Supply, "no {} left", c)
#[macro_export]
macro_rules! return_error {
    ($kind:ident, $($arg:tt)+) => {
        return Err($crate::error::new(
            $crate::error::ErrorKind::$kind,
            format!($($arg)+),
        )
        .into())
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fails(n: u8) -> Returns<u8> {
        if n > 3 {
            return_error!(Supply, "only 3 left, wanted {}", n);
        }
        Ok(n)
    }

    #[test]
    fn kind_survives_boxing() {
        let err = fails(5).unwrap_err();
        assert_eq!(kind_of(&err), Some(ErrorKind::Supply));
        assert_eq!(err.to_string(), "supply: only 3 left, wanted 5");
        let other: BoxAnyError = "plain".into();
        assert_eq!(kind_of(&other), None);
        assert_eq!(fails(2).unwrap(), 2);
    }
}
