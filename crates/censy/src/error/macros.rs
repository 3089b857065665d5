/// Creates an [`Error`](crate::Error) out of an enum variant that has an
/// `Into<ErrorKind>` impl. Field values go through [`Into`], and the field
/// init shorthand is supported:
///
/// ```ignore
/// err!(OracleError::Timeout { timeout })
/// ```
macro_rules! err {
    (@val $field:ident $val:expr) => ($val);
    (@val $field:ident) => ($field);
    ($variant:path $({
        $( $field:ident $(: $val:expr)? ),*
        $(,)?
    })?) => {{
        use $variant as Variant;

        $crate::error::Error::from(
            Variant $({$(
                $field: ::std::convert::Into::into($crate::error::err!(@val $field $($val)?))
            ),*})?
        )
    }};
}

/// `map_err` closure that puts the error into the `source` field of the variant
macro_rules! err_ctx {
    ($variant:path $({ $($fields:tt)* })?) => {
        |source| $crate::error::err!($variant { source, $($($fields)*)? })
    };
}

pub(crate) use err;
pub(crate) use err_ctx;
