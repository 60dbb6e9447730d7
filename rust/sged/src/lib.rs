//! Domain logic for the SGE school-management app: Mozambican field masks and
//! validators, the 0–20 grade scale, metical formatting, role permissions and
//! the signed-in session. The `sged` binary serves all of it to the UI over
//! stdin/stdout.

pub mod currency;
pub mod db;
pub mod grades;
pub mod ipc;
pub mod mozambique;
pub mod nav;
pub mod permissions;
pub mod provinces;
pub mod session;
