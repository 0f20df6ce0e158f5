pub mod use_ad_details;

pub use use_ad_details::{AdDetailsHandle, use_ad_details};
