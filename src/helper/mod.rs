pub mod metrics_helper;
