// Library root
// -----------
// This crate exposes a small blocking client for the VMC sizer API. The
// binary (`main.rs`) drives it through an interactive menu.
//
// Module responsibilities:
// - `api`: HTTP interactions with the sizer (token exchange, spreadsheet
//   upload, recommendation request).
// - `config`: endpoint locations, with production defaults.
// - `error`: the typed failure returned by every call.
// - `report`: turns a failed response into printed diagnostic lines.
// - `ui`: terminal flows that hand the access token between calls.
pub mod api;
pub mod config;
pub mod error;
pub mod report;
pub mod ui;
