pub type Result<T> = std::result::Result<T, crate::error::Error>;

/// Returns early with [`ErrorKind::InvalidArgument`](crate::ErrorKind::InvalidArgument)
/// naming the failed condition when it does not hold.
#[macro_export]
macro_rules! verify_arg {
    ($name:expr, $expr:expr) => {{
        let ok = $expr;
        $crate::result::verify_arg(ok, stringify!($name), stringify!($expr))?;
    }};
}

#[inline]
pub fn verify_arg(predicate: bool, name: &str, condition: &str) -> Result<()> {
    if predicate {
        Ok(())
    } else {
        Err(failed_arg(name, condition))
    }
}

/// Converts a signed index into `usize`, rejecting negative values.
#[inline]
pub fn non_negative(name: &str, value: i64) -> Result<usize> {
    usize::try_from(value).map_err(|_| crate::Error::negative_index(name, value))
}

#[cold]
fn failed_arg(name: &str, condition: &str) -> crate::Error {
    crate::Error::invalid_arg(name, format!("expected {condition}"))
}
