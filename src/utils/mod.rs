pub mod pagination;
pub mod scan_cooldown;
