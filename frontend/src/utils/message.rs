use crate::api::ApiError;

/// One success or error banner per page section. Setting one side clears
/// the other so stale feedback never lingers next to fresh feedback.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MessageState {
    pub success: Option<String>,
    pub error: Option<ApiError>,
}

impl MessageState {
    pub fn set_success(&mut self, text: impl Into<String>) {
        self.success = Some(text.into());
        self.error = None;
    }

    pub fn set_error(&mut self, error: ApiError) {
        self.error = Some(error);
        self.success = None;
    }

    pub fn clear(&mut self) {
        self.success = None;
        self.error = None;
    }

    pub fn is_empty(&self) -> bool {
        self.success.is_none() && self.error.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_and_error_are_mutually_exclusive() {
        let mut message = MessageState::default();
        assert!(message.is_empty());

        message.set_success("Zapisano.");
        assert_eq!(message.success.as_deref(), Some("Zapisano."));
        assert!(message.error.is_none());

        message.set_error(ApiError::unknown("boom"));
        assert!(message.success.is_none());
        assert_eq!(message.error.as_ref().map(|e| e.error.as_str()), Some("boom"));

        message.clear();
        assert!(message.is_empty());
    }
}
