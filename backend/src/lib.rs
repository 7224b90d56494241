pub mod db;
pub mod domain;
pub mod feeds;
pub mod rest;
