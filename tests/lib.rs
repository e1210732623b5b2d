//! End-to-end suites exercising the wired five-contract deployment:
//! identity, access grants, record vault, notification hub and activity
//! metrics, all registered in one `Env`.

#[cfg(test)]
mod common;

#[cfg(test)]
mod grant_lifecycle;

#[cfg(test)]
mod versioning;

#[cfg(test)]
mod notifications;

#[cfg(test)]
mod activity;
