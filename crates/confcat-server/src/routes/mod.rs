pub(crate) mod categories;
pub(crate) mod health;
pub(crate) mod sessions;
pub(crate) mod tags;
