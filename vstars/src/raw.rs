//! A direct representation of the parts of a facility bundle's XML that hold video maps.
//! Everything else in the file is ignored, and nothing here is validated; missing attributes
//! just become empty strings.

use anyhow::{Context, Result};
use roxmltree::Node;

use util::{prettyprint_usize, Timer};

/// `xsi:type` lives in this namespace. A `type` attribute in any other namespace doesn't count.
pub const XSI_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema-instance";

#[derive(Clone, Debug, Default, PartialEq)]
pub struct FacilityBundle {
    pub video_maps: Vec<VideoMaps>,
}

/// A `<VideoMaps>` container
#[derive(Clone, Debug, Default, PartialEq)]
pub struct VideoMaps {
    pub maps: Vec<VideoMap>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct VideoMap {
    pub long_name: String,
    pub stars_group: String,
    pub elements: Vec<Element>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Element {
    /// `xsi:type`, like "Line" or "Text"
    pub element_type: String,
    pub start_lat: String,
    pub start_lon: String,
    pub end_lat: String,
    pub end_lon: String,
}

impl FacilityBundle {
    pub fn load(path: &str, timer: &mut Timer) -> Result<FacilityBundle> {
        timer.start(format!("read {}", path));
        let bundle = util::slurp_file(path).and_then(|bytes| {
            let raw =
                std::str::from_utf8(&bytes).with_context(|| format!("{} isn't UTF-8", path))?;
            FacilityBundle::parse(raw).with_context(|| format!("parsing {}", path))
        });
        timer.stop(format!("read {}", path));
        let bundle = bundle?;

        if bundle.num_maps() == 0 {
            timer.warn(format!("{} doesn't contain any VideoMap elements", path));
        } else {
            info!(
                "{} has {} video maps",
                path,
                prettyprint_usize(bundle.num_maps())
            );
        }
        Ok(bundle)
    }

    /// Most exports wrap one or more `<VideoMaps>` in some root element. If that turns up
    /// nothing, the root itself is tried as the `<VideoMaps>` container. This is just a second
    /// guess at the shape, not format detection; zero maps from both is still fine.
    pub fn parse(raw: &str) -> Result<FacilityBundle> {
        let raw = raw.strip_prefix('\u{feff}').unwrap_or(raw);
        // Some exports carry a DOCTYPE line; it isn't needed to find the maps
        let tree = roxmltree::Document::parse_with_options(
            raw,
            roxmltree::ParsingOptions {
                allow_dtd: true,
                ..Default::default()
            },
        )?;
        let root = tree.root_element();

        let bundle = FacilityBundle {
            video_maps: children(root, "VideoMaps").map(VideoMaps::from_node).collect(),
        };
        if bundle.num_maps() > 0 {
            return Ok(bundle);
        }

        debug!(
            "No maps under <{}>, trying it as the VideoMaps container",
            root.tag_name().name()
        );
        if root.tag_name().name() == "VideoMaps" {
            return Ok(FacilityBundle {
                video_maps: vec![VideoMaps::from_node(root)],
            });
        }
        Ok(FacilityBundle::default())
    }

    pub fn num_maps(&self) -> usize {
        self.video_maps.iter().map(|vm| vm.maps.len()).sum()
    }

    pub fn all_maps(&self) -> impl Iterator<Item = &VideoMap> {
        self.video_maps.iter().flat_map(|vm| vm.maps.iter())
    }
}

impl VideoMaps {
    fn from_node(node: Node) -> VideoMaps {
        VideoMaps {
            maps: children(node, "VideoMap").map(VideoMap::from_node).collect(),
        }
    }
}

impl VideoMap {
    fn from_node(node: Node) -> VideoMap {
        VideoMap {
            long_name: attr(node, "LongName"),
            stars_group: attr(node, "STARSGroup"),
            elements: children(node, "Elements")
                .flat_map(|elements| children(elements, "Element"))
                .map(Element::from_node)
                .collect(),
        }
    }
}

impl Element {
    fn from_node(node: Node) -> Element {
        Element {
            element_type: node
                .attribute((XSI_NAMESPACE, "type"))
                .unwrap_or_default()
                .to_string(),
            start_lat: attr(node, "StartLat"),
            start_lon: attr(node, "StartLon"),
            end_lat: attr(node, "EndLat"),
            end_lon: attr(node, "EndLon"),
        }
    }

    pub fn is_line(&self) -> bool {
        self.element_type == "Line"
    }

    /// Some exports pad maps with lines that have every coordinate set to exactly "0".
    pub fn is_placeholder(&self) -> bool {
        self.start_lat == "0" && self.start_lon == "0" && self.end_lat == "0" && self.end_lon == "0"
    }
}

// Matches the local name only, so a default namespace on the document doesn't matter.
fn children<'a, 'input: 'a>(
    node: Node<'a, 'input>,
    name: &'a str,
) -> impl Iterator<Item = Node<'a, 'input>> + 'a {
    node.children()
        .filter(move |child| child.is_element() && child.tag_name().name() == name)
}

fn attr(node: Node, name: &str) -> String {
    node.attribute(name).unwrap_or_default().to_string()
}
