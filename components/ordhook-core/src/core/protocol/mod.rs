pub mod inscription_builder;
pub mod record_validation;
pub mod satoshi_tracking;
pub mod transaction_processor;
