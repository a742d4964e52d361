/*!
Capability registry.

Maps fully qualified class names to container and widget kinds. Built once
at startup, with optional libraries switched off when the host app does not
bundle them, then passed by reference into every classification.

Classification walks an element's class chain (most-derived first) and
takes the first hit, so a subclass registered on its own beats its parent
(`RatingBar` before `AbsSeekBar` before `ProgressBar`).
*/

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::ContainerKind;
use crate::platform::{ElementAttributes, ElementHandle};
use crate::widget::WidgetKind;

/// Optional UI libraries a host app may or may not bundle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub enum Library {
  /// Platform framework widgets. Always present.
  Framework,
  AndroidX,
  /// Legacy support library.
  Support,
  Material,
  /// Tencent X5 web core.
  X5WebView,
  /// UC web core.
  UcWebView,
}

impl Library {
  const ALL: [Self; 6] = [
    Self::Framework,
    Self::AndroidX,
    Self::Support,
    Self::Material,
    Self::X5WebView,
    Self::UcWebView,
  ];
}

#[derive(Debug, Clone, Copy)]
enum Known {
  Container(ContainerKind),
  Widget(WidgetKind),
}

#[rustfmt::skip]
const KNOWN_CLASSES: &[(Library, &str, Known)] = &[
  // Containers
  (Library::Framework, "android.widget.ExpandableListView", Known::Container(ContainerKind::ExpandableList)),
  (Library::Framework, "android.widget.AdapterView", Known::Container(ContainerKind::AdapterList)),
  (Library::Framework, "com.android.internal.view.menu.ExpandedMenuView", Known::Container(ContainerKind::MenuHost)),
  (Library::AndroidX, "androidx.appcompat.view.menu.ExpandedMenuView", Known::Container(ContainerKind::MenuHost)),
  (Library::Support, "android.support.v7.view.menu.ExpandedMenuView", Known::Container(ContainerKind::MenuHost)),
  (Library::AndroidX, "androidx.recyclerview.widget.RecyclerView", Known::Container(ContainerKind::RecyclerList)),
  (Library::Support, "android.support.v7.widget.RecyclerView", Known::Container(ContainerKind::RecyclerList)),
  (Library::AndroidX, "androidx.viewpager.widget.ViewPager", Known::Container(ContainerKind::Pager)),
  (Library::Support, "android.support.v4.view.ViewPager", Known::Container(ContainerKind::Pager)),
  (Library::AndroidX, "androidx.swiperefreshlayout.widget.SwipeRefreshLayout", Known::Container(ContainerKind::SwipeRefresh)),
  (Library::Support, "android.support.v4.widget.SwipeRefreshLayout", Known::Container(ContainerKind::SwipeRefresh)),
  // Widgets
  (Library::Framework, "android.widget.EditText", Known::Widget(WidgetKind::EditText)),
  (Library::Framework, "android.widget.RadioButton", Known::Widget(WidgetKind::RadioButton)),
  (Library::Framework, "android.widget.CompoundButton", Known::Widget(WidgetKind::CompoundButton)),
  (Library::Framework, "android.widget.Button", Known::Widget(WidgetKind::Button)),
  (Library::Framework, "android.widget.TextView", Known::Widget(WidgetKind::TextView)),
  (Library::Framework, "android.widget.RatingBar", Known::Widget(WidgetKind::RatingBar)),
  (Library::Framework, "android.widget.AbsSeekBar", Known::Widget(WidgetKind::SeekBar)),
  (Library::Framework, "android.widget.ProgressBar", Known::Widget(WidgetKind::ProgressBar)),
  (Library::Framework, "android.widget.Spinner", Known::Widget(WidgetKind::Spinner)),
  (Library::Framework, "android.widget.RadioGroup", Known::Widget(WidgetKind::RadioGroup)),
  (Library::Framework, "android.webkit.WebView", Known::Widget(WidgetKind::WebView)),
  (Library::X5WebView, "com.tencent.smtt.sdk.WebView", Known::Widget(WidgetKind::WebView)),
  (Library::UcWebView, "com.uc.webview.export.WebView", Known::Widget(WidgetKind::WebView)),
  (Library::Framework, "com.android.internal.view.menu.ListMenuItemView", Known::Widget(WidgetKind::MenuItemView)),
  (Library::AndroidX, "androidx.appcompat.view.menu.ListMenuItemView", Known::Widget(WidgetKind::MenuItemView)),
  (Library::Support, "android.support.v7.view.menu.ListMenuItemView", Known::Widget(WidgetKind::MenuItemView)),
  (Library::Material, "com.google.android.material.button.MaterialButton", Known::Widget(WidgetKind::MaterialButton)),
  (Library::Material, "com.google.android.material.tabs.TabLayout$TabView", Known::Widget(WidgetKind::TabView)),
  (Library::Material, "com.google.android.material.slider.Slider", Known::Widget(WidgetKind::Slider)),
  (Library::Material, "com.google.android.material.slider.RangeSlider", Known::Widget(WidgetKind::RangeSlider)),
];

/// Kinds resolved for one element, together with the attributes they were
/// resolved from. Fetched once per element per walk.
#[derive(Debug, Clone, PartialEq)]
pub struct Profile {
  pub class_name: String,
  pub container: ContainerKind,
  pub widget: WidgetKind,
  pub attributes: ElementAttributes,
}

/// Class-name to kind lookup tables.
#[derive(Debug, Clone)]
pub struct CapabilityRegistry {
  containers: HashMap<String, ContainerKind>,
  widgets: HashMap<String, WidgetKind>,
  libraries: HashSet<Library>,
}

impl Default for CapabilityRegistry {
  fn default() -> Self {
    Self::android()
  }
}

impl CapabilityRegistry {
  /// Registry with every known library available.
  pub fn android() -> Self {
    Self::builder().build()
  }

  pub fn builder() -> CapabilityRegistryBuilder {
    CapabilityRegistryBuilder {
      libraries: Library::ALL.into_iter().collect(),
      extra_containers: Vec::new(),
      extra_widgets: Vec::new(),
    }
  }

  pub fn has_library(&self, library: Library) -> bool {
    self.libraries.contains(&library)
  }

  /// Container kind for a class chain (most-derived first).
  pub fn container_kind<S: AsRef<str>>(&self, class_chain: &[S]) -> ContainerKind {
    class_chain
      .iter()
      .find_map(|class| self.containers.get(class.as_ref()).copied())
      .unwrap_or_default()
  }

  /// Widget kind for a class chain (most-derived first).
  pub fn widget_kind<S: AsRef<str>>(&self, class_chain: &[S]) -> WidgetKind {
    class_chain
      .iter()
      .find_map(|class| self.widgets.get(class.as_ref()).copied())
      .unwrap_or_default()
  }

  /// Fetch attributes and resolve both kinds for an element.
  pub fn profile<H: ElementHandle>(&self, element: &H) -> Profile {
    self.profile_attributes(element.attributes())
  }

  pub fn profile_attributes(&self, attributes: ElementAttributes) -> Profile {
    Profile {
      class_name: attributes.simple_class_name().to_owned(),
      container: self.container_kind(&attributes.class_chain),
      widget: self.widget_kind(&attributes.class_chain),
      attributes,
    }
  }
}

/// Builder for a [`CapabilityRegistry`].
#[derive(Debug, Clone)]
#[must_use = "Builder does nothing until .build() is called"]
pub struct CapabilityRegistryBuilder {
  libraries: HashSet<Library>,
  extra_containers: Vec<(String, ContainerKind)>,
  extra_widgets: Vec<(String, WidgetKind)>,
}

impl CapabilityRegistryBuilder {
  /// Mark a library as not bundled. The framework cannot be removed.
  pub fn without(mut self, library: Library) -> Self {
    if library == Library::Framework {
      log::warn!("CapabilityRegistry: framework classes are always available");
      return self;
    }
    self.libraries.remove(&library);
    self
  }

  /// Register a host class (e.g. a custom list) as a container kind.
  pub fn container(mut self, class: impl Into<String>, kind: ContainerKind) -> Self {
    self.extra_containers.push((class.into(), kind));
    self
  }

  /// Register a host class as a widget kind.
  pub fn widget(mut self, class: impl Into<String>, kind: WidgetKind) -> Self {
    self.extra_widgets.push((class.into(), kind));
    self
  }

  pub fn build(self) -> CapabilityRegistry {
    let mut containers = HashMap::new();
    let mut widgets = HashMap::new();

    for &(library, class, known) in KNOWN_CLASSES {
      if !self.libraries.contains(&library) {
        continue;
      }
      match known {
        Known::Container(kind) => {
          containers.insert(class.to_owned(), kind);
        }
        Known::Widget(kind) => {
          widgets.insert(class.to_owned(), kind);
        }
      }
    }
    containers.extend(self.extra_containers);
    widgets.extend(self.extra_widgets);

    log::debug!(
      "CapabilityRegistry: {} container classes, {} widget classes, libraries {:?}",
      containers.len(),
      widgets.len(),
      self.libraries
    );

    CapabilityRegistry {
      containers,
      widgets,
      libraries: self.libraries,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  const RATING_CHAIN: &[&str] = &[
    "android.widget.RatingBar",
    "android.widget.AbsSeekBar",
    "android.widget.ProgressBar",
    "android.view.View",
  ];

  mod widget_kind {
    use super::*;

    #[test]
    fn most_derived_class_wins() {
      let registry = CapabilityRegistry::android();
      assert_eq!(registry.widget_kind(RATING_CHAIN), WidgetKind::RatingBar);
      assert_eq!(
        registry.widget_kind(&["android.widget.SeekBar", "android.widget.AbsSeekBar"]),
        WidgetKind::SeekBar
      );
    }

    #[test]
    fn unknown_chain_is_generic() {
      let registry = CapabilityRegistry::android();
      assert_eq!(
        registry.widget_kind(&["com.example.Fancy", "android.view.View"]),
        WidgetKind::Generic
      );
    }

    #[test]
    fn missing_library_is_not_matched() {
      let registry = CapabilityRegistry::builder().without(Library::Material).build();
      assert!(!registry.has_library(Library::Material));
      assert_eq!(
        registry.widget_kind(&[
          "com.google.android.material.slider.Slider",
          "android.view.View"
        ]),
        WidgetKind::Generic
      );
    }

    #[test]
    fn framework_cannot_be_removed() {
      let registry = CapabilityRegistry::builder().without(Library::Framework).build();
      assert!(registry.has_library(Library::Framework));
      assert_eq!(
        registry.widget_kind(&["android.widget.TextView"]),
        WidgetKind::TextView
      );
    }
  }

  mod container_kind {
    use super::*;

    #[test]
    fn expandable_beats_adapter_view() {
      let registry = CapabilityRegistry::android();
      let chain = [
        "android.widget.ExpandableListView",
        "android.widget.ListView",
        "android.widget.AbsListView",
        "android.widget.AdapterView",
      ];
      assert_eq!(registry.container_kind(&chain), ContainerKind::ExpandableList);
    }

    #[test]
    fn spinner_is_both_list_and_widget() {
      let registry = CapabilityRegistry::android();
      let chain = [
        "android.widget.Spinner",
        "android.widget.AbsSpinner",
        "android.widget.AdapterView",
      ];
      assert_eq!(registry.container_kind(&chain), ContainerKind::AdapterList);
      assert_eq!(registry.widget_kind(&chain), WidgetKind::Spinner);
    }

    #[test]
    fn support_recycler_needs_support_library() {
      let chain = ["android.support.v7.widget.RecyclerView"];
      let with = CapabilityRegistry::android();
      let without = CapabilityRegistry::builder().without(Library::Support).build();
      assert_eq!(with.container_kind(&chain), ContainerKind::RecyclerList);
      assert_eq!(without.container_kind(&chain), ContainerKind::Plain);
    }

    #[test]
    fn host_registered_container() {
      let registry = CapabilityRegistry::builder()
        .container("com.example.InfiniteList", ContainerKind::RecyclerList)
        .build();
      assert_eq!(
        registry.container_kind(&["com.example.InfiniteList", "android.view.ViewGroup"]),
        ContainerKind::RecyclerList
      );
    }
  }

  #[test]
  fn profile_resolves_once() {
    let registry = CapabilityRegistry::android();
    let attributes = ElementAttributes {
      class_chain: RATING_CHAIN.iter().map(|s| (*s).to_owned()).collect(),
      ..ElementAttributes::default()
    };
    let profile = registry.profile_attributes(attributes);
    assert_eq!(profile.class_name, "RatingBar");
    assert_eq!(profile.widget, WidgetKind::RatingBar);
    assert_eq!(profile.container, ContainerKind::Plain);
  }
}
