/// Database models for Questify
///
/// Each model owns its CRUD operations against the pool.
///
/// # Models
///
/// - `user`: User accounts (password and Google-linked) with roles
/// - `task`: Owner-scoped tasks
/// - `pomodoro_session`: Pomodoro session records with XP tracking

pub mod pomodoro_session;
pub mod task;
pub mod user;
