pub mod events {
    pub mod event_builder;
}
pub mod http;
