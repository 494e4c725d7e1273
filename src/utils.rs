pub trait BlankExtension {
    /// True when the value is empty or only whitespace.
    fn is_blank(&self) -> bool;
}

impl BlankExtension for str {
    fn is_blank(&self) -> bool {
        self.trim().is_empty()
    }
}

impl BlankExtension for String {
    fn is_blank(&self) -> bool {
        self.as_str().is_blank()
    }
}

#[cfg(test)]
mod tests {
    use super::BlankExtension;

    #[test]
    fn whitespace_is_blank() {
        assert!("".is_blank());
        assert!("  \t\n".is_blank());
        assert!(String::from(" ").is_blank());
        assert!(!" a ".is_blank());
    }
}
