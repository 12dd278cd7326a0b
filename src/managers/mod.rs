// historymidi managers
// Sources that supply history records to the mapper.

pub mod history_source;
