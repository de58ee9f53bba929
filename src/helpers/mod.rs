//! Small conversion helpers shared by the shell

pub mod dates;
pub mod files;
pub mod options;

pub use dates::date_to_str;
pub use files::{decode_base64_file, encode_data_url, encode_file, strip_data_url};
pub use options::{ControlTime, CreditRange, OptionItem};
