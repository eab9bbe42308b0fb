mod hostname_resolver;
mod random;

pub use hostname_resolver::ForwardHostnameResolver;
pub use random::FastrandPicker;
