//! Identity utilities
//!
//! The workflow treats an identity as opaque; these helpers only exist so
//! logs never carry a full email address.

/// Mask an identity for logs (e.g., jo***@example.com)
pub fn mask_identity(identity: &str) -> String {
    match identity.split_once('@') {
        Some((local, domain)) if !local.is_empty() => {
            let visible: String = local.chars().take(2).collect();
            format!("{}***@{}", visible, domain)
        }
        _ => {
            let count = identity.chars().count();
            if count > 4 {
                let tail: String = identity.chars().skip(count - 4).collect();
                format!("****{}", tail)
            } else {
                "****".to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_email() {
        assert_eq!(mask_identity("john.doe@example.com"), "jo***@example.com");
        assert_eq!(mask_identity("a@example.com"), "a***@example.com");
    }

    #[test]
    fn test_mask_opaque_identity() {
        assert_eq!(mask_identity("user-12345678"), "****5678");
        assert_eq!(mask_identity("abc"), "****");
        assert_eq!(mask_identity("@example.com"), "****.com");
    }
}
