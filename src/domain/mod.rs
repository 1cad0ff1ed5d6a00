//! Domain layer: the validated contact record.

pub mod contact_record;

pub use contact_record::ContactRecord;
