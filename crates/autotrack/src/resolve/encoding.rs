/*!
Per-encoding path assembly.

The walk is identical for both encodings; only the strings each step writes
differ.

Legacy keeps two strings. `literal` carries every real index
(`/ListView[0]/LinearLayout[12]`); `pattern` equals `literal` except at the
deepest virtualized slot, where the index is `-`
(`/ListView[0]/LinearLayout[-]`).

Outline keeps three. `structural` is class names only; `exact` carries
positions; `outline` equals `exact` except at the deepest virtualized slot.
*/

use crate::classify::BoundaryPrefix;
use crate::types::PathEncoding;

/// Position of one element under its parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
  /// Plain container: same-class sibling index.
  Sibling(i32),
  /// Recycled list row at this adapter position.
  Virtualized(i32),
  Header(i32),
  Footer(i32),
  Group(i32),
  Child { group: i32, child: i32 },
}

/// One appended element.
#[derive(Debug, Clone, Copy)]
pub struct Step<'a> {
  pub class_name: &'a str,
  pub slot: Slot,
  pub resource_id: Option<&'a str>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegacyPath {
  pub pattern: String,
  pub literal: String,
}

impl LegacyPath {
  fn push(&mut self, step: &Step<'_>) {
    let class = step.class_name;
    match step.slot {
      Slot::Sibling(n) => self.push_both(&format!("/{class}[{n}]")),
      Slot::Virtualized(position) => {
        self.pattern = format!("{}/{class}[-]", self.literal);
        self.literal.push_str(&format!("/{class}[{position}]"));
      }
      Slot::Header(h) => self.push_both(&format!("/ELH[{h}]/{class}[0]")),
      Slot::Footer(f) => self.push_both(&format!("/ELF[{f}]/{class}[0]")),
      Slot::Group(g) => {
        self.pattern = format!("{}/ELVG[-]/{class}[0]", self.literal);
        self.literal.push_str(&format!("/ELVG[{g}]/{class}[0]"));
      }
      Slot::Child { group, child } => {
        self.pattern = format!("{}/ELVG[{group}]/ELVC[-]/{class}[0]", self.literal);
        self
          .literal
          .push_str(&format!("/ELVG[{group}]/ELVC[{child}]/{class}[0]"));
      }
    }
    if let Some(id) = step.resource_id {
      self.push_both(&format!("#{id}"));
    }
  }

  fn push_both(&mut self, segment: &str) {
    self.pattern.push_str(segment);
    self.literal.push_str(segment);
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutlinePath {
  pub structural: String,
  pub exact: String,
  pub outline: String,
}

impl OutlinePath {
  fn push(&mut self, step: &Step<'_>) {
    let class = step.class_name;
    match step.slot {
      Slot::Sibling(n) => {
        self.structural.push_str(&format!("/{class}"));
        self.push_both(&format!("/{n}"));
      }
      Slot::Virtualized(_) => {
        self.structural.push_str(&format!("/{class}"));
        self.outline = format!("{}/-", self.exact);
        self.exact.push_str("/-");
      }
      Slot::Header(h) => {
        self.structural.push_str(&format!("/ELH/{class}"));
        self.push_both(&format!("/{h}/0"));
      }
      Slot::Footer(f) => {
        self.structural.push_str(&format!("/ELF/{class}"));
        self.push_both(&format!("/{f}/0"));
      }
      Slot::Group(g) => {
        self.structural.push_str(&format!("/ELVG/{class}"));
        self.outline = format!("{}/-/0", self.exact);
        self.exact.push_str(&format!("/{g}/0"));
      }
      Slot::Child { group, child } => {
        self.structural.push_str(&format!("/ELVG/ELVC/{class}"));
        self.outline = format!("{}/{group}/-/0", self.exact);
        self.exact.push_str(&format!("/{group}/{child}/0"));
      }
    }
    if let Some(id) = step.resource_id {
      replace_last_segment(&mut self.exact, id);
      replace_last_segment(&mut self.outline, id);
    }
  }

  fn push_both(&mut self, segment: &str) {
    self.exact.push_str(segment);
    self.outline.push_str(segment);
  }
}

/// Swap the trailing segment for `id`, unless it is the `-` placeholder.
fn replace_last_segment(path: &mut String, id: &str) {
  let Some(slash) = path.rfind('/') else {
    return;
  };
  if path.get(slash + 1..) == Some("-") {
    return;
  }
  path.truncate(slash + 1);
  path.push_str(id);
}

/// Path strings under construction, in one of the two encodings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathText {
  Legacy(LegacyPath),
  Outline(OutlinePath),
}

impl PathText {
  /// Start at a window or page boundary and append the boundary element.
  pub fn at_boundary(encoding: PathEncoding, prefix: &BoundaryPrefix, root_class: &str) -> Self {
    let mut text = Self::empty(encoding);
    text.restart(prefix, root_class);
    text
  }

  /// `/id` for an element carrying an override id.
  pub fn at_override(encoding: PathEncoding, id: &str) -> Self {
    match encoding {
      PathEncoding::Legacy => Self::Legacy(LegacyPath {
        pattern: format!("/{id}"),
        literal: format!("/{id}"),
      }),
      PathEncoding::Outline => Self::Outline(OutlinePath {
        structural: format!("/{id}"),
        exact: "/0".to_owned(),
        outline: "/0".to_owned(),
      }),
    }
  }

  fn empty(encoding: PathEncoding) -> Self {
    match encoding {
      PathEncoding::Legacy => Self::Legacy(LegacyPath {
        pattern: String::new(),
        literal: String::new(),
      }),
      PathEncoding::Outline => Self::Outline(OutlinePath {
        structural: String::new(),
        exact: String::new(),
        outline: String::new(),
      }),
    }
  }

  pub const fn encoding(&self) -> PathEncoding {
    match self {
      Self::Legacy(_) => PathEncoding::Legacy,
      Self::Outline(_) => PathEncoding::Outline,
    }
  }

  /// Drop everything so far and start over from `prefix`, with the element
  /// at the boundary named `root_class`.
  pub fn restart(&mut self, prefix: &BoundaryPrefix, root_class: &str) {
    match self {
      Self::Legacy(path) => {
        let segment = if prefix.index_root {
          format!("/{root_class}[0]")
        } else {
          format!("/{root_class}")
        };
        path.literal = format!("{}{segment}", prefix.legacy);
        path.pattern.clone_from(&path.literal);
      }
      Self::Outline(path) => {
        path.structural = format!("{}/{root_class}", prefix.structural);
        path.exact = format!("{}/0", prefix.outline);
        path.outline.clone_from(&path.exact);
      }
    }
  }

  /// Restart from a page prefix, then append `step` as a normal segment.
  pub fn restart_at_page(&mut self, prefix: &BoundaryPrefix, step: &Step<'_>) {
    match self {
      Self::Legacy(path) => {
        path.literal.clone_from(&prefix.legacy);
        path.pattern.clone_from(&prefix.legacy);
      }
      Self::Outline(path) => {
        path.structural.clone_from(&prefix.structural);
        path.exact.clone_from(&prefix.outline);
        path.outline.clone_from(&prefix.outline);
      }
    }
    self.push(step);
  }

  pub fn push(&mut self, step: &Step<'_>) {
    match self {
      Self::Legacy(path) => path.push(step),
      Self::Outline(path) => path.push(step),
    }
  }

  /// The stable path: legacy pattern, or class-only structural path.
  pub fn structural(&self) -> &str {
    match self {
      Self::Legacy(path) => &path.pattern,
      Self::Outline(path) => &path.structural,
    }
  }

  /// Outline encoding's positional outline.
  pub fn positional_outline(&self) -> Option<&str> {
    match self {
      Self::Legacy(_) => None,
      Self::Outline(path) => Some(&path.outline),
    }
  }

  /// Legacy encoding's literal path.
  pub fn literal(&self) -> Option<&str> {
    match self {
      Self::Legacy(path) => Some(&path.literal),
      Self::Outline(_) => None,
    }
  }
}
