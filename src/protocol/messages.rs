use bytes::Buf;

use crate::error::{AuthError, Result};

/// Structured fields of an ErrorResponse payload.
///
/// PostgreSQL error payloads are a sequence of (field-code, cstring) pairs
/// ending with a zero byte. Only the fields relevant to authentication
/// diagnostics are kept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorFields {
    pub severity: Option<String>,
    pub sqlstate: Option<String>,
    pub message: Option<String>,
}

impl ErrorFields {
    pub fn parse(payload: &[u8]) -> ErrorFields {
        let mut b = payload;
        let mut fields = ErrorFields::default();

        while !b.is_empty() {
            let code = b[0];
            b = &b[1..];
            if code == 0 {
                break;
            }
            if let Some(pos) = b.iter().position(|&x| x == 0) {
                let s = String::from_utf8_lossy(&b[..pos]).to_string();
                match code {
                    b'S' => fields.severity = Some(s),
                    b'C' => fields.sqlstate = Some(s),
                    b'M' => fields.message = Some(s),
                    _ => {}
                }
                b = &b[pos + 1..];
            } else {
                break;
            }
        }

        fields
    }
}

pub fn parse_error_response(payload: &[u8]) -> String {
    let fields = ErrorFields::parse(payload);
    match (fields.message, fields.sqlstate) {
        (Some(m), Some(c)) => format!("{m} (SQLSTATE {c})"),
        (Some(m), None) => m,
        _ => "unknown server error".to_string(),
    }
}

/// Split an authentication-request payload into the method code and the
/// method-specific remainder (the salt, for md5).
pub fn parse_auth_request(payload: &[u8]) -> Result<(i32, &[u8])> {
    if payload.len() < 4 {
        return Err(AuthError::Protocol("auth request too short".into()));
    }
    let mut b = payload;
    let code = b.get_i32();
    Ok((code, b))
}

pub fn parse_md5_salt(rest: &[u8]) -> Result<[u8; 4]> {
    if rest.len() < 4 {
        return Err(AuthError::Protocol("md5 auth salt missing".into()));
    }
    let mut salt = [0u8; 4];
    salt.copy_from_slice(&rest[..4]);
    Ok(salt)
}

/// Extract the credential bytes from a PasswordMessage payload.
///
/// The payload is the password as a null-terminated string; a missing
/// terminator is a malformed message.
pub fn parse_password_message(payload: &[u8]) -> Result<&[u8]> {
    match payload.iter().position(|&x| x == 0) {
        Some(pos) => Ok(&payload[..pos]),
        None => Err(AuthError::Protocol(
            "password message missing terminator".into(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_error_prefers_message() {
        // 'M' "hello" \0 'C' "12345" \0 \0
        let payload = [
            b'M', b'h', b'e', b'l', b'l', b'o', 0, b'C', b'1', b'2', b'3', b'4', b'5', 0, 0,
        ];
        let s = parse_error_response(&payload);
        assert!(s.contains("hello"));
        assert!(s.contains("SQLSTATE"));
    }

    #[test]
    fn parse_error_fields_all_present() {
        let mut payload = Vec::new();
        payload.extend_from_slice(b"SFATAL\0");
        payload.extend_from_slice(b"C28P01\0");
        payload.extend_from_slice(b"Mpassword authentication failed\0");
        payload.push(0);

        let fields = ErrorFields::parse(&payload);
        assert_eq!(fields.severity.as_deref(), Some("FATAL"));
        assert_eq!(fields.sqlstate.as_deref(), Some("28P01"));
        assert_eq!(
            fields.message.as_deref(),
            Some("password authentication failed")
        );
    }

    #[test]
    fn parse_error_empty_payload() {
        assert_eq!(parse_error_response(&[]), "unknown server error");
    }

    #[test]
    fn parse_auth_request_splits_code_and_salt() {
        let payload = [0, 0, 0, 5, 0xDE, 0xAD, 0xBE, 0xEF];
        let (code, rest) = parse_auth_request(&payload).unwrap();
        assert_eq!(code, 5);
        assert_eq!(parse_md5_salt(rest).unwrap(), [0xDE, 0xAD, 0xBE, 0xEF]);
    }

    #[test]
    fn parse_auth_request_too_short() {
        let err = parse_auth_request(&[0, 0]).unwrap_err();
        assert!(err.is_protocol());
    }

    #[test]
    fn parse_md5_salt_truncated() {
        let err = parse_md5_salt(&[1, 2]).unwrap_err();
        assert!(err.is_protocol());
    }

    #[test]
    fn parse_password_message_strips_terminator() {
        assert_eq!(parse_password_message(b"secret\0").unwrap(), b"secret");
        assert_eq!(parse_password_message(b"\0").unwrap(), b"");
    }

    #[test]
    fn parse_password_message_missing_terminator() {
        let err = parse_password_message(b"secret").unwrap_err();
        assert!(err.is_protocol());
    }
}
