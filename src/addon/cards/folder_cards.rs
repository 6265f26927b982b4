use super::card_model::{Action, Card, DecoratedText, Icon, Section, Widget};
use super::widgets::{file_count, filled_button, header_from, peek_header};
use crate::addon::endpoints::{CardContext, Endpoint};
use crate::addon::params::FolderCardParams;
use crate::core::folders::folder_models::{MY_DRIVE_NAME, ROOT_DRIVE_ID};
use crate::core::folders::{FolderListing, FolderView, NavigationState, SharedDrive};

/// Card for whatever the browser resolved.
pub fn folder_card(ctx: &CardContext, params: &FolderCardParams, view: &FolderView) -> Card {
    match view {
        FolderView::DriveSelection { drives, .. } => drive_selection_card(ctx, params, drives),
        FolderView::Folder { state, listing } => {
            folder_selection_card(ctx, params, state, listing)
        }
    }
}

fn navigate(ctx: &CardContext, params: &FolderCardParams) -> Action {
    ctx.action_with(Endpoint::FolderNavigate, params)
}

/// Toggle between A-Z and Z-A.
fn order_section(ctx: &CardContext, params: &FolderCardParams) -> Section {
    let (label, arrow) = if params.reverse_order {
        ("Z-A", "arrow_upward")
    } else {
        ("A-Z", "arrow_downward")
    };

    Section::new().widget(
        DecoratedText::new(format!("Orden: <b>{}</b>", label))
            .bottom_label("<i>Selecciona para invertir</i>")
            .start_icon(Icon::material("format_line_spacing"))
            .end_icon(Icon::graded(arrow, 200))
            .on_click(navigate(ctx, &params.with_order(!params.reverse_order))),
    )
}

/// Header of the folder list, e.g. "Mas de 30 Carpetas".
pub fn folder_count_header(shown: usize, too_many: bool) -> String {
    format!(
        "<b>{}{} Carpeta{}</b>",
        if too_many { "Mas de " } else { "" },
        shown,
        if shown > 1 { "s" } else { "" }
    )
}

/// Personal drive first, then the shared drives.
pub fn drive_selection_card(
    ctx: &CardContext,
    params: &FolderCardParams,
    drives: &[SharedDrive],
) -> Card {
    let mut drives_section = Section::new()
        .widget(
            DecoratedText::new(MY_DRIVE_NAME)
                .bottom_label("Disco personal")
                .start_icon(Icon::material("home_and_garden"))
                .on_click(navigate(ctx, &params.at(ROOT_DRIVE_ID))),
        )
        .widget(Widget::divider());

    for drive in drives {
        drives_section = drives_section.widget(
            DecoratedText::new(drive.name.as_str())
                .bottom_label("Disco compartido")
                .start_icon(Icon::material("folder_shared"))
                .on_click(navigate(ctx, &params.at(&drive.id))),
        );
    }

    Card::new()
        .header(header_from(&params.header))
        .peek_header(peek_header(
            "Drives",
            "En Google Drive",
            &params.header.image_url,
        ))
        .section(order_section(ctx, &params.at("")))
        .section(drives_section)
}

/// One folder: where we are, how to go up, its subfolders, and the callback.
pub fn folder_selection_card(
    ctx: &CardContext,
    params: &FolderCardParams,
    state: &NavigationState,
    listing: &FolderListing,
) -> Card {
    let here = params.at(&state.item_id);

    let current = Section::new()
        .widget(
            DecoratedText::new(format!("<b>{}</b>", state.name))
                .bottom_label(format!("Carpeta en {}", state.drive_name))
                .start_icon(Icon::material("folder_eye")),
        )
        .widget(file_count(listing.other_files_count));

    let back = Section::new().widget(
        DecoratedText::new("Regresar")
            .bottom_label("Subir un nivel")
            .start_icon(Icon::material("drive_folder_upload"))
            .on_click(navigate(ctx, &params.at(&state.parent_id))),
    );

    let mut card = Card::new()
        .header(header_from(&params.header))
        .peek_header(peek_header(
            &state.name,
            &format!("En {}", state.drive_name),
            &params.header.image_url,
        ))
        .section(current)
        .section(back)
        .section(order_section(ctx, &here));

    if !listing.folders.is_empty() {
        let mut folders = Section::new().header(folder_count_header(
            listing.folders.len(),
            listing.too_many_folders,
        ));
        for folder in &listing.folders {
            folders = folders.widget(
                DecoratedText::new(folder.name.as_str())
                    .start_icon(Icon::material("folder"))
                    .on_click(navigate(ctx, &params.at(&folder.id))),
            );
        }
        card = card.section(folders);
    }

    card.section(Section::new().widget(filled_button(
        &params.callback_text,
        ctx.action_with(params.callback.endpoint(), &here),
    )))
}
