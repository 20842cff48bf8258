// libpn532/src/protocol/parser.rs

use crate::ResponseError;

type Result<T> = std::result::Result<T, ResponseError>;

/// Ensure the slice has at least `min` bytes.
pub fn ensure_len(data: &[u8], min: usize) -> Result<()> {
    if data.len() < min {
        return Err(ResponseError::Truncated {
            expected: min,
            actual: data.len(),
        });
    }
    Ok(())
}

/// Return a subslice with bounds checking.
pub fn slice_at(data: &[u8], idx: usize, len: usize) -> Result<&[u8]> {
    ensure_len(data, idx + len)?;
    Ok(&data[idx..idx + len])
}

/// Read a single byte at `idx` with bounds checking.
pub fn byte_at(data: &[u8], idx: usize) -> Result<u8> {
    ensure_len(data, idx + 1)?;
    Ok(data[idx])
}

/// Read a fixed-size array at `idx` with bounds checking.
pub fn array_at<const N: usize>(data: &[u8], idx: usize) -> Result<[u8; N]> {
    let mut out = [0u8; N];
    out.copy_from_slice(slice_at(data, idx, N)?);
    Ok(out)
}

/// Ensure the first byte (response code) equals `expected`. Returns
/// UnexpectedResponse on mismatch and Truncated on an empty slice.
pub fn expect_response_code(data: &[u8], expected: u8) -> Result<()> {
    let actual = byte_at(data, 0)?;
    if actual != expected {
        return Err(ResponseError::UnexpectedResponse { expected, actual });
    }
    Ok(())
}
