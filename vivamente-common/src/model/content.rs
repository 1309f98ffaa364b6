use thiserror::Error;

/// Text of a post or comment. Never blank.
#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Hash)]
pub struct Content(String);

#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Default, Hash, Error)]
#[error("Content must not be blank")]
pub struct InvalidContentError;

impl Content {
    pub fn new(content: String) -> Result<Self, InvalidContentError> {
        if content.trim().is_empty() {
            Err(InvalidContentError)
        } else {
            Ok(Self(content))
        }
    }

    #[must_use]
    pub fn new_unchecked(content: &str) -> Self {
        Self::new(content.to_owned()).expect("Content was blank.")
    }

    #[must_use]
    pub fn get(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl TryFrom<String> for Content {
    type Error = InvalidContentError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for Content {
    type Error = InvalidContentError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value.to_owned())
    }
}

#[cfg(test)]
mod tests {
    use crate::model::content::{Content, InvalidContentError};

    #[test]
    fn blank_content_is_rejected() {
        assert_eq!(Content::try_from(""), Err(InvalidContentError));
        assert_eq!(Content::try_from("  \n\t "), Err(InvalidContentError));

        let content = Content::try_from("  hello ").unwrap();
        assert_eq!(content.get(), "  hello ");
    }
}
