use std::fmt;

pub fn display_fn<F>(f: F) -> impl fmt::Display
where
    F: Fn(&mut fmt::Formatter<'_>) -> fmt::Result,
{
    struct DisplayFn<F> {
        f: F,
    }
    impl<F> fmt::Display for DisplayFn<F>
    where
        F: Fn(&mut fmt::Formatter<'_>) -> fmt::Result,
    {
        fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
            (self.f)(formatter)
        }
    }
    DisplayFn { f }
}

/// `"a"`, `"a or b"`, `"a, b or c"`, ...
pub fn display_alternatives<T>(items: &[T]) -> impl fmt::Display + '_
where
    T: fmt::Display,
{
    display_fn(move |f| {
        let last = items.len().saturating_sub(1);
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                f.write_str(if i == last { " or " } else { ", " })?;
            }
            write!(f, "{}", item)?;
        }
        Ok(())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alternatives() {
        assert_eq!(display_alternatives::<&str>(&[]).to_string(), "");
        assert_eq!(display_alternatives(&["a"]).to_string(), "a");
        assert_eq!(display_alternatives(&["a", "b"]).to_string(), "a or b");
        assert_eq!(
            display_alternatives(&["a", "b", "c", "d"]).to_string(),
            "a, b, c or d"
        );
    }
}
