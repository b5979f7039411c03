use crate::error::ApiError;

pub const MAX_COMMENT_LENGTH: usize = 10_000;

/// Rejects drafts the store would refuse anyway, with a readable message.
pub fn check_comment_content(content: &str) -> Result<(), ApiError> {
  if content.trim().is_empty() {
    return Err(ApiError::err("comment_empty"));
  }
  if content.chars().count() > MAX_COMMENT_LENGTH {
    return Err(ApiError::err("comment_too_long"));
  }
  Ok(())
}

#[cfg(test)]
mod tests {
  use crate::utils::{check_comment_content, MAX_COMMENT_LENGTH};

  #[test]
  fn test_check_comment_content() {
    assert!(check_comment_content("a perfectly fine comment").is_ok());
    assert!(check_comment_content("").is_err());
    assert!(check_comment_content("   \n").is_err());
    assert!(check_comment_content(&"x".repeat(MAX_COMMENT_LENGTH + 1)).is_err());
    assert!(check_comment_content(&"x".repeat(MAX_COMMENT_LENGTH)).is_ok());
  }
}
