use crate::errors::{ServiceError, ServiceResult};
use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

/// Generates an unguessable confirmation code together with its expiry.
///
/// Codes are random (v4) UUIDs. The expiry is `now + ttl`; a `ttl` that
/// pushes the expiry out of the representable range is an internal error.
///
/// # Examples
///
/// ```ignore
/// let (code, expires_at) = generate_confirmation_code(Utc::now(), Duration::hours(1))?;
/// assert_eq!(code.len(), 36);
/// ```
pub fn generate_confirmation_code(
    now: DateTime<Utc>,
    ttl: Duration,
) -> ServiceResult<(String, DateTime<Utc>)> {
    let expires_at = now.checked_add_signed(ttl).ok_or_else(|| {
        ServiceError::internal_error(format!("Confirmation code lifetime {ttl} is out of range"))
    })?;

    Ok((Uuid::new_v4().to_string(), expires_at))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_are_unique_and_expire_after_ttl() {
        let now = Utc::now();
        let (first, first_expiry) = generate_confirmation_code(now, Duration::hours(1)).unwrap();
        let (second, _) = generate_confirmation_code(now, Duration::hours(1)).unwrap();

        assert_ne!(first, second);
        assert_eq!(first_expiry, now + Duration::hours(1));
        assert!(Uuid::parse_str(&first).is_ok());
    }

    #[test]
    fn test_unrepresentable_expiry_is_an_error() {
        let result = generate_confirmation_code(Utc::now(), Duration::minutes(200_000_000_000));

        assert!(matches!(result, Err(ServiceError::InternalError { .. })));
    }
}
