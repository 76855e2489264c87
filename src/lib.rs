pub mod shared {
    pub mod infrastructure {
        pub mod change_channel;
        pub mod key_value_storage;
    }
}

pub mod modules {
    pub mod events {
        pub mod core {
            pub mod category;
            pub mod event;
            pub mod filters;
            pub mod patch;
            pub mod ports;
            pub mod time_of_day;
        }
        pub mod use_cases {
            pub mod errors;
            pub mod create_event {
                pub mod handler;
                pub mod inbound {
                    pub mod http;
                }
            }
            pub mod replace_events {
                pub mod handler;
                pub mod inbound {
                    pub mod http;
                }
            }
            pub mod delete_event {
                pub mod inbound {
                    pub mod http;
                }
            }
            pub mod list_events {
                pub mod inbound {
                    pub mod http;
                }
            }
        }
        pub mod adapters {
            pub mod outbound {
                pub mod http_api;
                pub mod in_memory;
                pub mod json_document;
                pub mod local_storage;
            }
        }
        pub mod store {
            pub mod events_store;
            pub mod snapshot_cache;
            pub mod sync_worker;
        }
    }
}

pub mod shell;
