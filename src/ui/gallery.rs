/// Thumbnail grid
///
/// `tiles` is a pure function of the library and the query; `view` turns
/// its output into widgets.

use chrono::{DateTime, Utc};
use iced::widget::image::Handle;
use iced::widget::{button, column, container, image, row, text};
use iced::{ContentFit, Element, Length, Pixels};
use iced_aw::Wrap;

use crate::state::data::ImageId;
use crate::state::library::Library;
use crate::state::search::SearchQuery;
use crate::Message;

/// One visible gallery entry
#[derive(Debug, Clone, PartialEq)]
pub struct Tile<'a> {
    pub id: ImageId,
    /// Unique automation marker, also used as the container id
    pub marker: String,
    pub name: &'a str,
    pub handle: &'a Handle,
    pub declared_type: Option<&'a str>,
    pub dimensions: Option<(u32, u32)>,
    pub uploaded_at: DateTime<Utc>,
}

impl Tile<'_> {
    /// Small caption under the name: upload time, type and size when known
    pub fn caption(&self) -> String {
        let mut caption = self.uploaded_at.format("%H:%M:%S").to_string();
        if let Some(declared_type) = self.declared_type {
            caption.push_str(" · ");
            caption.push_str(declared_type);
        }
        if let Some((width, height)) = self.dimensions {
            caption.push_str(&format!(" · {}x{}", width, height));
        }
        caption
    }
}

/// Derive the visible tiles in library order
pub fn tiles<'a>(library: &'a Library, query: &SearchQuery) -> Vec<Tile<'a>> {
    library
        .images()
        .filter(|img| query.matches(&img.name))
        .filter_map(|img| {
            let preview = img.preview.as_ref()?;
            Some(Tile {
                id: img.id,
                marker: img.id.tile_marker(),
                name: &img.name,
                handle: preview.handle(),
                declared_type: img.declared_type.as_deref(),
                dimensions: preview.dimensions(),
                uploaded_at: img.uploaded_at,
            })
        })
        .collect()
}

/// Build the grid widget
pub fn view<'a>(tiles: Vec<Tile<'a>>, tile_size: f32, library_empty: bool) -> Element<'a, Message> {
    if library_empty {
        return container(text("No photos yet. Upload some or drop them on the window.").size(16))
            .width(Length::Fill)
            .center_x(Length::Fill)
            .padding(40)
            .into();
    }

    let elements: Vec<Element<'a, Message>> = tiles
        .into_iter()
        .map(|tile| tile_view(tile, tile_size))
        .collect();

    Wrap::with_elements(elements)
        .spacing(Pixels(12.0))
        .line_spacing(Pixels(12.0))
        .into()
}

fn tile_view<'a>(tile: Tile<'a>, tile_size: f32) -> Element<'a, Message> {
    let caption = tile.caption();
    let header = row![
        text(tile.name).size(13).width(Length::Fill),
        button(text("✕").size(12))
            .on_press(Message::RemoveImage(tile.id))
            .padding(2),
    ]
    .spacing(4);

    let content = column![
        image(tile.handle.clone())
            .width(Length::Fixed(tile_size))
            .height(Length::Fixed(tile_size))
            .content_fit(ContentFit::Cover),
        header,
        text(caption).size(11),
    ]
    .spacing(4)
    .width(Length::Fixed(tile_size));

    container(content)
        .id(container::Id::new(tile.marker))
        .padding(6)
        .style(container::rounded_box)
        .into()
}
