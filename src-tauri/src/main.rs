#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

fn main() {
    webchat_shell_lib::run()
}
