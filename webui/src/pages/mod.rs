//! Eine Datei pro Bildschirm; Logik liegt im Kern, hier nur Darstellung.

pub mod browse;
pub mod history;
pub mod policies;
pub mod policy_editor;
pub mod preferences;
pub mod repo;
pub mod restore;
pub mod sources;
pub mod tasks;
