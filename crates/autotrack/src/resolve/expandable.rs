/*!
Expandable (two-level) list positions.

Maps a flat adapter position onto header, group, child, or footer rows,
given how many children each group currently shows.
*/

use crate::platform::ExpandableLayout;

/// Where a flat position lands in an expandable list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpandableSlot {
  /// Index among header rows.
  Header(i32),
  /// Index counted from the first footer row.
  Footer(i32),
  Group(i32),
  Child { group: i32, child: i32 },
}

impl ExpandableLayout {
  /// Total flat rows: headers, groups with their visible children, footers.
  pub fn row_count(&self) -> i32 {
    let groups = self
      .expanded_children
      .iter()
      .fold(0i32, |rows, children| {
        rows.saturating_add(children.max(&0).saturating_add(1))
      });
    self
      .header_count
      .saturating_add(groups)
      .saturating_add(self.footer_count)
  }

  /// Locate a flat position. Positions past the last group are footers.
  pub fn locate(&self, position: i32) -> ExpandableSlot {
    if position < self.header_count {
      return ExpandableSlot::Header(position);
    }

    let mut remaining = position.saturating_sub(self.header_count);
    for (group, &children) in (0..).zip(&self.expanded_children) {
      if remaining == 0 {
        return ExpandableSlot::Group(group);
      }
      let children = children.max(0);
      if remaining <= children {
        return ExpandableSlot::Child {
          group,
          child: remaining - 1,
        };
      }
      remaining = remaining.saturating_sub(children.saturating_add(1));
    }

    ExpandableSlot::Footer(
      position.saturating_sub(self.row_count().saturating_sub(self.footer_count)),
    )
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn layout(headers: i32, groups: &[i32], footers: i32) -> ExpandableLayout {
    ExpandableLayout {
      first_visible: 0,
      header_count: headers,
      footer_count: footers,
      expanded_children: groups.to_vec(),
    }
  }

  mod locate {
    use super::*;

    #[test]
    fn collapsed_groups() {
      let list = layout(0, &[0, 0, 0], 0);
      assert_eq!(list.locate(0), ExpandableSlot::Group(0));
      assert_eq!(list.locate(2), ExpandableSlot::Group(2));
    }

    #[test]
    fn expanded_group_children() {
      // group 0 (pos 0), its 2 children (1, 2), group 1 (3), group 2 (4), its child (5)
      let list = layout(0, &[2, 0, 1], 0);
      assert_eq!(list.locate(1), ExpandableSlot::Child { group: 0, child: 0 });
      assert_eq!(list.locate(2), ExpandableSlot::Child { group: 0, child: 1 });
      assert_eq!(list.locate(3), ExpandableSlot::Group(1));
      assert_eq!(list.locate(5), ExpandableSlot::Child { group: 2, child: 0 });
    }

    #[test]
    fn headers_and_footers() {
      let list = layout(2, &[1], 2);
      assert_eq!(list.row_count(), 6);
      assert_eq!(list.locate(1), ExpandableSlot::Header(1));
      assert_eq!(list.locate(2), ExpandableSlot::Group(0));
      assert_eq!(list.locate(4), ExpandableSlot::Footer(0));
      assert_eq!(list.locate(5), ExpandableSlot::Footer(1));
    }

    #[test]
    fn huge_counts_saturate() {
      let list = layout(i32::MAX, &[i32::MAX, i32::MAX], i32::MAX);
      assert_eq!(list.row_count(), i32::MAX);
      assert_eq!(list.locate(i32::MAX - 1), ExpandableSlot::Header(i32::MAX - 1));

      let list = layout(0, &[i32::MAX], 3);
      assert_eq!(
        list.locate(i32::MAX),
        ExpandableSlot::Child { group: 0, child: i32::MAX - 1 }
      );
    }
  }

  mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
      #[test]
      fn every_row_maps_to_exactly_one_slot(
        headers in 0..4i32,
        groups in prop::collection::vec(0..5i32, 0..8),
        footers in 0..4i32,
      ) {
        let list = layout(headers, &groups, footers);
        let mut group_rows = 0;
        let mut child_rows = 0;
        for position in 0..list.row_count() {
          match list.locate(position) {
            ExpandableSlot::Header(h) => prop_assert!(h >= 0 && h < headers),
            ExpandableSlot::Footer(f) => prop_assert!(f >= 0 && f < footers),
            ExpandableSlot::Group(_) => group_rows += 1,
            ExpandableSlot::Child { group, child } => {
              child_rows += 1;
              let shown = groups.get(usize::try_from(group).unwrap()).copied().unwrap();
              prop_assert!(child >= 0 && child < shown);
            }
          }
        }
        prop_assert_eq!(group_rows, i32::try_from(groups.len()).unwrap());
        prop_assert_eq!(child_rows, groups.iter().sum::<i32>());
      }
    }
  }
}
