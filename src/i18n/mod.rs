//! Internationalization (i18n) module.
//!
//! Localized strings for the terminal viewer and CLI output.
//! English is the default language; Spanish is available as an alternative.

use std::sync::OnceLock;

static CURRENT_LANG: OnceLock<Lang> = OnceLock::new();

/// Supported languages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lang {
    /// English (default)
    En,
    /// Spanish
    Es,
}

impl Lang {
    /// Parse a language code string (e.g. "en", "es", "en_US", "es_ES").
    /// Returns `None` for unrecognized codes.
    pub fn from_code(code: &str) -> Option<Self> {
        let normalized = code.to_lowercase();
        let prefix = normalized.split(['_', '-', '.']).next().unwrap_or("");
        match prefix {
            "en" => Some(Self::En),
            "es" => Some(Self::Es),
            _ => None,
        }
    }

    /// Return the ISO 639-1 code for this language.
    pub fn code(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Es => "es",
        }
    }
}

/// Initialize the global language. Call once at startup.
/// If already initialized, this is a no-op.
pub fn set_lang(lang: Lang) {
    let _ = CURRENT_LANG.set(lang);
}

/// Get the currently configured language (defaults to English).
pub fn lang() -> Lang {
    CURRENT_LANG.get().copied().unwrap_or(Lang::En)
}

/// Detect language from `ATTACHVIEW_LANG`, then `LC_MESSAGES`, then `LANG`.
pub fn detect_system_lang() -> Lang {
    ["ATTACHVIEW_LANG", "LC_MESSAGES", "LANG"]
        .iter()
        .filter_map(|var| std::env::var(var).ok())
        .find_map(|v| Lang::from_code(&v))
        .unwrap_or(Lang::En)
}

/// Macro for defining translatable message functions.
/// Each function returns a `&'static str` based on the current language.
macro_rules! msg {
    ($name:ident, $en:expr, $es:expr) => {
        /// Returns a localized string for the current language.
        pub fn $name() -> &'static str {
            match lang() {
                Lang::En => $en,
                Lang::Es => $es,
            }
        }
    };
}

// ── General ──────────────────────────────────────────────────────

msg!(app_name, "attachview", "attachview");
msg!(
    app_about,
    "attachview: browse, preview, export and delete the image and PDF attachments of a record.",
    "attachview: explora, previsualiza, exporta y borra los adjuntos de imagen y PDF de un registro."
);
msg!(
    app_long_about,
    "attachview: terminal viewer for record attachments.\nSlide through images and PDFs, page and zoom PDFs,\nsave attachments to disk and delete them with confirmation.",
    "attachview: visor de terminal para adjuntos de registros.\nRecorre im\u{e1}genes y PDF, pagina y ampl\u{ed}a los PDF,\nguarda adjuntos en disco y b\u{f3}rralos con confirmaci\u{f3}n."
);
msg!(
    app_after_help,
    "A record is a directory; each PNG, JPEG, GIF or PDF file inside it is one attachment.\nA sibling '<file>.txt' holds the attachment's note.",
    "Un registro es un directorio; cada fichero PNG, JPEG, GIF o PDF que contiene es un adjunto.\nUn fichero hermano '<fichero>.txt' contiene la nota del adjunto."
);

// ── CLI help strings ─────────────────────────────────────────────

msg!(
    help_cmd_open,
    "Open a record directory in the viewer (default if no subcommand given)",
    "Abrir un directorio de registro en el visor (por defecto si no se da subcomando)"
);
msg!(
    help_cmd_list,
    "List the attachments of a record",
    "Listar los adjuntos de un registro"
);
msg!(
    help_cmd_export,
    "Export attachments of a record to a directory",
    "Exportar adjuntos de un registro a un directorio"
);
msg!(
    help_cmd_init_config,
    "Write the default configuration file",
    "Escribir el fichero de configuraci\u{f3}n por defecto"
);
msg!(
    help_cmd_completions,
    "Generate shell completions",
    "Generar autocompletado para la shell"
);
msg!(
    help_cmd_manpage,
    "Generate a man page",
    "Generar p\u{e1}gina de manual"
);

// ── CLI output ───────────────────────────────────────────────────

msg!(msg_loading, "Loading attachments", "Cargando adjuntos");
msg!(msg_attachments, "attachment(s)", "adjunto(s)");
msg!(
    msg_no_attachments,
    "No attachments found.",
    "No se encontraron adjuntos."
);
msg!(msg_exported, "Exported", "Exportado(s)");
msg!(msg_attachments_to, "attachment(s) to", "adjunto(s) en");
msg!(msg_config_written, "Configuration written to", "Configuraci\u{f3}n escrita en");
msg!(cli_col_id, "Id", "Id");
msg!(cli_col_title, "Title", "T\u{ed}tulo");

// ── Errors ───────────────────────────────────────────────────────

msg!(
    err_dir_not_found,
    "Record directory not found",
    "Directorio de registro no encontrado"
);
msg!(
    err_no_dir_given,
    "No record directory given. Usage: attachview <DIR>",
    "No se indic\u{f3} directorio de registro. Uso: attachview <DIR>"
);
msg!(
    err_attachment_not_found,
    "Attachment not found",
    "Adjunto no encontrado"
);
msg!(err_fetch_failed, "Could not load attachments", "No se pudieron cargar los adjuntos");

// ── TUI titles and labels ────────────────────────────────────────

msg!(tui_help_title, " Help ", " Ayuda ");
msg!(
    tui_help_description,
    "Image and PDF attachment viewer",
    "Visor de adjuntos de imagen y PDF"
);
msg!(tui_slide_title, " Attachment ", " Adjunto ");
msg!(tui_thumbnails_title, " Attachments ", " Adjuntos ");
msg!(tui_preview_title, " Preview ", " Vista previa ");
msg!(tui_delete_title, " Delete attachment ", " Borrar adjunto ");
msg!(
    tui_delete_question,
    "Delete this attachment permanently?",
    "\u{bf}Borrar este adjunto definitivamente?"
);
msg!(tui_delete_choices, "[y] Yes   [n] No", "[y] S\u{ed}   [n] No");
msg!(tui_no_attachments, "No attachments", "Sin adjuntos");
msg!(tui_loading, "Loading...", "Cargando...");
msg!(
    tui_stale,
    "list out of date, press r",
    "lista desactualizada, pulsa r"
);
msg!(tui_help_hint, " [?] Help ", " [?] Ayuda ");
msg!(tui_col_filename, "File", "Fichero");
msg!(tui_col_type, "Type", "Tipo");
msg!(tui_col_size, "Size", "Tama\u{f1}o");
msg!(tui_col_note, "Note", "Nota");
msg!(tui_image, "Image", "Imagen");
msg!(
    tui_unsupported,
    "This attachment cannot be displayed",
    "Este adjunto no se puede mostrar"
);
msg!(tui_placeholder_icon, "placeholder icon", "icono sustituto");
msg!(tui_pdf_loading, "Opening PDF...", "Abriendo PDF...");
msg!(tui_pdf_failed, "Could not open PDF", "No se pudo abrir el PDF");
msg!(tui_pdf_retry, "Press R to retry", "Pulsa R para reintentar");
msg!(tui_pdf_page, "Page", "P\u{e1}gina");
msg!(tui_pdf_zoom, "Zoom", "Zoom");
msg!(tui_pdf_viewport, "Viewport", "Lienzo");
msg!(tui_pdf_render, "Render", "Render");

// ── Help popup ───────────────────────────────────────────────────

msg!(tui_help_navigation, "Navigation", "Navegaci\u{f3}n");
msg!(tui_help_preview, "Preview", "Vista previa");
msg!(tui_help_pdf, "PDF", "PDF");
msg!(tui_help_general, "General", "General");
msg!(tui_help_next_prev, "Next / prev", "Siguiente / anterior");
msg!(tui_help_jump, "Jump to slide", "Ir a diapositiva");
msg!(tui_help_first_last, "First / last", "Primero / \u{fa}ltimo");
msg!(tui_help_open_preview, "Open preview", "Abrir vista previa");
msg!(tui_help_close, "Close / cancel", "Cerrar / cancelar");
msg!(tui_help_download, "Download", "Descargar");
msg!(tui_help_delete, "Delete", "Borrar");
msg!(tui_help_confirm, "Confirm / cancel", "Confirmar / cancelar");
msg!(tui_help_page, "Next / prev page", "P\u{e1}gina sig. / ant.");
msg!(tui_help_first_last_page, "First / last page", "Primera / \u{fa}ltima p\u{e1}g.");
msg!(tui_help_zoom, "Zoom in / out", "Ampliar / reducir");
msg!(tui_help_retry, "Retry PDF", "Reintentar PDF");
msg!(tui_help_refresh, "Reload list", "Recargar lista");
msg!(tui_help_help, "This help", "Esta ayuda");
msg!(tui_help_quit, "Quit", "Salir");

// ── Status bar hints ─────────────────────────────────────────────

msg!(tui_hint_nav, "Navigate", "Navegar");
msg!(tui_hint_open, "Preview", "Ver");
msg!(tui_hint_download, "Download", "Descargar");
msg!(tui_hint_delete, "Delete", "Borrar");
msg!(tui_hint_close, "Close", "Cerrar");
msg!(tui_hint_page, "Page", "P\u{e1}gina");
msg!(tui_hint_zoom, "Zoom", "Zoom");
msg!(tui_hint_retry, "Retry", "Reintentar");
msg!(tui_hint_refresh, "Reload", "Recargar");
msg!(tui_hint_confirm, "Confirm", "Confirmar");
msg!(tui_hint_cancel, "Cancel", "Cancelar");
msg!(tui_hint_help, "Help", "Ayuda");
msg!(tui_hint_quit, "Quit", "Salir");

// ── Status messages ──────────────────────────────────────────────

msg!(status_saved_to, "Saved to", "Guardado en");
msg!(status_download_failed, "Download failed", "Error al descargar");
msg!(status_deleted, "Attachment deleted", "Adjunto borrado");
msg!(status_delete_failed, "Delete failed", "Error al borrar");
msg!(
    status_delete_disabled,
    "Deleting is disabled",
    "El borrado est\u{e1} desactivado"
);
msg!(status_reloaded, "Reloaded", "Recargado");
msg!(status_no_such_slide, "No such slide", "No existe esa diapositiva");
