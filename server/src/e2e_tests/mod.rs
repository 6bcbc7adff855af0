//! End-to-end tests at the HTTP request/response level.
//!
//! Each test file covers a specific scenario, driving the real router
//! in-process with a manually controlled clock.

#![cfg(test)]

mod helpers;

mod test_add_entry;
mod test_auth_rejections;
mod test_get_entry;
mod test_hello;
mod test_id_reuse;
mod test_list_entries;
mod test_remove_entry;
mod test_token;
