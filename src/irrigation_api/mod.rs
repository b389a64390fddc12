#[cfg(test)]
pub mod fake_client;
pub mod irrigation_client;
pub mod models;
#[cfg(test)]
pub mod test_server;
