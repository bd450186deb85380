// Header names and typed header dispatch
//
// `HeaderName` identifies a field; `TypedHeader::parse` routes its value text to the
// parser of the matching header type.

pub mod header_name;
pub mod typed_header;

pub use header_name::HeaderName;
pub use typed_header::{Header, TypedHeader};
