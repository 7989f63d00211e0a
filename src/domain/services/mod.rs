mod link_rewriter;
mod name_formatter;

pub use link_rewriter::{
    DelimitedLink, LinkKind, ParsedLink, Protocol, Rewrite, RewriteError, VmessLink,
};
pub use name_formatter::{format_name, SEGMENT_DELIMITER};
