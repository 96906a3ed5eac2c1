use bytes::{BufMut, Bytes, BytesMut};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

use crate::error::{AuthError, Result};

/// Upper bound on a single inbound message during authentication. Nothing a
/// well-behaved counterpart sends at this stage comes close; a length above
/// this is treated as a framing error rather than allocated.
pub const MAX_MESSAGE_LEN: usize = 1024 * 1024;

/// A tagged protocol message, as exchanged in either direction.
#[derive(Debug, Clone)]
pub struct Message {
    pub tag: u8,
    pub payload: Bytes, // payload excludes the 4-byte length field
}

pub async fn read_message<R: AsyncRead + Unpin>(rd: &mut R) -> Result<Message> {
    let mut hdr = [0u8; 5];
    rd.read_exact(&mut hdr).await?;
    let tag = hdr[0];
    let len = i32::from_be_bytes([hdr[1], hdr[2], hdr[3], hdr[4]]) as usize;
    if len < 4 {
        return Err(AuthError::Protocol(format!(
            "invalid message length: {len}"
        )));
    }
    let payload_len = len - 4;
    if payload_len > MAX_MESSAGE_LEN {
        return Err(AuthError::Protocol(format!(
            "message too long: {payload_len} bytes"
        )));
    }
    let mut buf = vec![0u8; payload_len];
    rd.read_exact(&mut buf).await?;
    Ok(Message {
        tag,
        payload: Bytes::from(buf),
    })
}

/// AuthenticationOk: 'R' with method code 0.
pub async fn write_authentication_ok<W: AsyncWrite + Unpin>(wr: &mut W) -> Result<()> {
    write_authentication_request(wr, 0, &[]).await
}

/// AuthenticationCleartextPassword: 'R' with method code 3.
pub async fn write_authentication_cleartext<W: AsyncWrite + Unpin>(wr: &mut W) -> Result<()> {
    write_authentication_request(wr, 3, &[]).await
}

/// AuthenticationMD5Password: 'R' with method code 5 carrying the salt.
pub async fn write_authentication_md5<W: AsyncWrite + Unpin>(
    wr: &mut W,
    salt: &[u8; 4],
) -> Result<()> {
    write_authentication_request(wr, 5, salt).await
}

async fn write_authentication_request<W: AsyncWrite + Unpin>(
    wr: &mut W,
    code: i32,
    extra: &[u8],
) -> Result<()> {
    let mut buf = BytesMut::with_capacity(9 + extra.len());
    buf.put_u8(b'R');
    buf.put_i32((8 + extra.len()) as i32);
    buf.put_i32(code);
    buf.extend_from_slice(extra);

    wr.write_all(&buf).await?;
    wr.flush().await?;
    Ok(())
}

pub async fn write_password_message<W: AsyncWrite + Unpin>(
    wr: &mut W,
    payload: &[u8],
) -> Result<()> {
    let mut buf = BytesMut::with_capacity(payload.len() + 16);
    buf.put_u8(b'p');
    buf.put_i32(0);
    buf.extend_from_slice(payload);

    let len = (buf.len() - 1) as i32;
    buf[1..5].copy_from_slice(&len.to_be_bytes());

    wr.write_all(&buf).await?;
    wr.flush().await?;
    Ok(())
}

/// ErrorResponse with severity, SQLSTATE and message fields.
pub async fn write_error_response<W: AsyncWrite + Unpin>(
    wr: &mut W,
    severity: &str,
    sqlstate: &str,
    message: &str,
) -> Result<()> {
    let mut buf = BytesMut::with_capacity(message.len() + 64);
    buf.put_u8(b'E');
    buf.put_i32(0); // length placeholder

    buf.put_u8(b'S');
    buf.extend_from_slice(severity.as_bytes());
    buf.put_u8(0);
    buf.put_u8(b'V');
    buf.extend_from_slice(severity.as_bytes());
    buf.put_u8(0);
    buf.put_u8(b'C');
    buf.extend_from_slice(sqlstate.as_bytes());
    buf.put_u8(0);
    buf.put_u8(b'M');
    buf.extend_from_slice(message.as_bytes());
    buf.put_u8(0);
    buf.put_u8(0); // terminator

    let len = (buf.len() - 1) as i32;
    buf[1..5].copy_from_slice(&len.to_be_bytes());

    wr.write_all(&buf).await?;
    wr.flush().await?;
    Ok(())
}
