mod cdf;

pub use self::cdf::CDF;
