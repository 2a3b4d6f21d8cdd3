#![allow(dead_code)]
pub mod http_mock;
pub mod udp_mock;
