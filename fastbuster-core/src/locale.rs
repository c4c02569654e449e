//! User-facing text tables.
//!
//! One immutable [`Messages`] table per [`Language`]. The table is picked once at
//! start-up and handed to whoever renders text; nothing reads it as global state.

use serde::Deserialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Es,
    En,
}

impl Language {
    pub fn code(self) -> &'static str {
        match self {
            Language::Es => "es",
            Language::En => "en",
        }
    }

    pub fn messages(self) -> &'static Messages {
        match self {
            Language::Es => &SPANISH,
            Language::En => &ENGLISH,
        }
    }

    /// The single key that confirms a destructive action.
    pub fn affirmative_key(self) -> char {
        match self {
            Language::Es => 's',
            Language::En => 'y',
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Text table for one language. Templates use `{name}` placeholders.
#[derive(Debug)]
pub struct Messages {
    pub language: Language,
    pub select_language: &'static str,
    pub language_option_1: &'static str,
    pub language_option_2: &'static str,
    pub select_language_prompt: &'static str,
    pub invalid_language: &'static str,
    pub no_device_selected: &'static str,
    connected_to: &'static str,
    browsing_partitions: &'static str,
    pub actions: &'static str,
    go_to_partition: &'static str,
    flash_confirm: &'static str,
    flashing: &'static str,
    flash_success: &'static str,
    flash_error: &'static str,
    pub flash_cancelled: &'static str,
    pub flash_file_title: &'static str,
    wipe_confirm: &'static str,
    wiping: &'static str,
    wipe_success: &'static str,
    wipe_error: &'static str,
    pub boot_file_title: &'static str,
    booting: &'static str,
    boot_success: &'static str,
    boot_error: &'static str,
    pub rebooting: &'static str,
    pub reboot_success: &'static str,
    reboot_error: &'static str,
    partition_not_found: &'static str,
    pub no_partitions: &'static str,
    partition_details: &'static str,
    pub image_files: &'static str,
    pub all_files: &'static str,
}

impl Messages {
    pub fn connected_to(&self, serial: &str) -> String {
        fill(self.connected_to, &[("serial", serial)])
    }

    pub fn browsing_partitions(&self, serial: &str) -> String {
        fill(self.browsing_partitions, &[("serial", serial)])
    }

    pub fn go_to_partition(&self, buffer: &str) -> String {
        fill(self.go_to_partition, &[("buffer", buffer)])
    }

    pub fn flash_confirm(&self, file: &str, partition: &str) -> String {
        fill(self.flash_confirm, &[("file", file), ("partition", partition)])
    }

    pub fn flashing(&self, file: &str, partition: &str) -> String {
        fill(self.flashing, &[("file", file), ("partition", partition)])
    }

    pub fn flash_success(&self, file: &str, partition: &str) -> String {
        fill(self.flash_success, &[("file", file), ("partition", partition)])
    }

    pub fn flash_error(&self, partition: &str, error: &str) -> String {
        fill(self.flash_error, &[("partition", partition), ("error", error)])
    }

    pub fn wipe_confirm(&self, partition: &str) -> String {
        fill(self.wipe_confirm, &[("partition", partition)])
    }

    pub fn wiping(&self, partition: &str) -> String {
        fill(self.wiping, &[("partition", partition)])
    }

    pub fn wipe_success(&self, partition: &str) -> String {
        fill(self.wipe_success, &[("partition", partition)])
    }

    pub fn wipe_error(&self, partition: &str, error: &str) -> String {
        fill(self.wipe_error, &[("partition", partition), ("error", error)])
    }

    pub fn booting(&self, file: &str) -> String {
        fill(self.booting, &[("file", file)])
    }

    pub fn boot_success(&self, file: &str) -> String {
        fill(self.boot_success, &[("file", file)])
    }

    pub fn boot_error(&self, file: &str, error: &str) -> String {
        fill(self.boot_error, &[("file", file), ("error", error)])
    }

    pub fn reboot_error(&self, error: &str) -> String {
        fill(self.reboot_error, &[("error", error)])
    }

    pub fn partition_not_found(&self, partition: &str) -> String {
        fill(self.partition_not_found, &[("partition", partition)])
    }

    pub fn partition_details(&self, partition: &str, details: &str) -> String {
        fill(
            self.partition_details,
            &[("partition", partition), ("details", details)],
        )
    }
}

/// Substitute `{name}` placeholders in a single pass.
///
/// Substituted values are never rescanned, so device output containing braces is shown
/// verbatim. Unknown placeholders are left as-is.
fn fill(template: &str, vars: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        match after.find('}') {
            Some(close) => {
                let name = &after[..close];
                match vars.iter().find(|(key, _)| *key == name) {
                    Some((_, value)) => out.push_str(value),
                    None => {
                        out.push('{');
                        out.push_str(name);
                        out.push('}');
                    }
                }
                rest = &after[close + 1..];
            }
            None => {
                out.push_str(&rest[open..]);
                rest = "";
            }
        }
    }
    out.push_str(rest);
    out
}

pub static SPANISH: Messages = Messages {
    language: Language::Es,
    select_language: "Seleccione idioma / Select language:",
    language_option_1: "1. Español",
    language_option_2: "2. English",
    select_language_prompt: "Seleccione 1 o 2 y Enter: ",
    invalid_language: "¡Opción no válida! Presiona Enter para intentarlo otra vez.",
    no_device_selected: "No seleccionaste ningún dispositivo. Cerrando...",
    connected_to: "¡Conectado al dispositivo: {serial}!",
    browsing_partitions: "Explorando particiones en modo Fastboot: {serial}",
    actions: "Acciones: [q] Salir, [u] Flashear, [o] Borrar, [b] Bootear, [R] Reiniciar, [r] Ir a partición, [Enter] Detalles",
    go_to_partition: "Escribe el nombre de la partición: {buffer}",
    flash_confirm: "¿Flashear '{file}' en '{partition}'? (s/n)",
    flashing: "Flasheando '{file}' en '{partition}'... ¡Espera!",
    flash_success: "¡'{file}' flasheado en '{partition}' con éxito!",
    flash_error: "Error al flashear '{partition}': {error}",
    flash_cancelled: "Flasheo cancelado. No seleccionaste ningún archivo.",
    flash_file_title: "Seleccionar archivo para flashear",
    wipe_confirm: "¿Borrar '{partition}'? (s/n)",
    wiping: "Borrando '{partition}'... ¡Espera!",
    wipe_success: "¡Partición '{partition}' borrada con éxito!",
    wipe_error: "Error al borrar '{partition}': {error}",
    boot_file_title: "Seleccionar archivo para bootear",
    booting: "Booteando '{file}'... ¡Espera!",
    boot_success: "¡'{file}' booteado con éxito!",
    boot_error: "Error al bootear '{file}': {error}",
    rebooting: "Reiniciando dispositivo...",
    reboot_success: "¡Dispositivo reiniciado!",
    reboot_error: "Error al reiniciar: {error}",
    partition_not_found: "Partición '{partition}' no encontrada.",
    no_partitions: "No se detectaron particiones. Asegúrate de estar en modo Fastboot.",
    partition_details: "Detalles de '{partition}': {details}",
    image_files: "Imágenes",
    all_files: "Todos",
};

pub static ENGLISH: Messages = Messages {
    language: Language::En,
    select_language: "Select language / Seleccione idioma:",
    language_option_1: "1. Spanish",
    language_option_2: "2. English",
    select_language_prompt: "Pick 1 or 2 and hit Enter: ",
    invalid_language: "Invalid choice! Hit Enter to try again.",
    no_device_selected: "No device selected. Shutting down...",
    connected_to: "Connected to device: {serial}!",
    browsing_partitions: "Browsing partitions in Fastboot mode: {serial}",
    actions: "Actions: [q] Quit, [u] Flash, [o] Wipe, [b] Boot, [R] Reboot, [r] Go to part., [Enter] Details",
    go_to_partition: "Enter partition name: {buffer}",
    flash_confirm: "Flash '{file}' to '{partition}'? (y/n)",
    flashing: "Flashing '{file}' to '{partition}'...",
    flash_success: "'{file}' flashed to '{partition}' successfully!",
    flash_error: "Error flashing '{partition}': {error}",
    flash_cancelled: "Flash cancelled. You didn't pick a file.",
    flash_file_title: "Select file to flash",
    wipe_confirm: "Wipe '{partition}'? (y/n)",
    wiping: "Wiping '{partition}'...",
    wipe_success: "Partition '{partition}' wiped successfully!",
    wipe_error: "Error wiping '{partition}': {error}",
    boot_file_title: "Select file to boot",
    booting: "Booting '{file}'...",
    boot_success: "'{file}' booted successfully!",
    boot_error: "Error booting '{file}': {error}",
    rebooting: "Rebooting device...",
    reboot_success: "Device rebooted!",
    reboot_error: "Error rebooting: {error}",
    partition_not_found: "Partition '{partition}' not found.",
    no_partitions: "No partitions detected. Ensure device is in Fastboot mode.",
    partition_details: "Details for '{partition}': {details}",
    image_files: "Image Files",
    all_files: "All",
};
