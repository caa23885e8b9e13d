// src/constants.rs

// --- Backend Routes ---
pub const LEVELS_ENDPOINT: &str = "/api/levels";
pub const PROGRESS_ENDPOINT: &str = "/api/progress";

// --- Client Identity ---
// Namespace under the platform data dir, and the file holding the
// generated user id. The file name matches the key the web client
// used in local storage so a migrated deployment keeps its ids stable.
pub const APP_DATA_DIR: &str = "mathgrid";
pub const USER_ID_FILE: &str = "loja_user_id";

// --- Draggable Pool ---
// Pool unit ids follow `num-{value}-{index}` so the frontend can address
// one concrete unit even when the pool holds duplicate values.
pub const POOL_ID_PREFIX: &str = "num";
