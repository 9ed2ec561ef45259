pub mod keys;
pub mod record;
pub mod translate;
