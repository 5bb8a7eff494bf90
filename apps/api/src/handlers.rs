pub mod applications;
pub mod health;
pub mod outbox;
pub mod vacancies;

#[cfg(test)]
pub(crate) mod test_support;
