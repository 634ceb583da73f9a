pub mod icon;
pub mod price_feed;
pub mod util;

pub use icon::HttpIconResolver;
pub use price_feed::HttpPriceFeed;
