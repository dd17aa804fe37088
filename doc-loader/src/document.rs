
/// One page-level unit of a loaded file.
///
/// `page` is 1-based and counts units across the whole file in load order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Document {
    pub text: String,
    pub source: String,
    pub page: u32,
}
