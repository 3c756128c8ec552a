// III-IV
// Copyright 2023 Julio Merino
//
// Licensed under the Apache License, Version 2.0 (the "License"); you may not
// use this file except in compliance with the License.  You may obtain a copy
// of the License at:
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS, WITHOUT
// WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.  See the
// License for the specific language governing permissions and limitations
// under the License.

//! Operations on items.

use crate::driver::Driver;
use crate::model::*;

/// Long description attached to items when clients request full details.
const LONG_DESCRIPTION: &str = "This is an amazing item that has a long description";

/// Computes the exclusive end of a slice of `count` elements starting at `start` in a list of
/// `len` elements.  The result is always within `[0, len]`.
fn slice_end(start: usize, count: i64, len: usize) -> usize {
    let len = len as i128;
    let mut end = start as i128 + i128::from(count);
    if end < 0 {
        end += len;
    }
    end.clamp(0, len) as usize
}

impl Driver {
    /// Returns the slice of demo items selected by `query`.
    ///
    /// The slice spans from `skip` up to `skip + limit`.  When that end is negative, it counts
    /// back from the end of the list, so `skip=1&limit=-1` drops the first and last items.  Out
    /// of range positions never fail: they just yield fewer items, or none.
    pub(crate) fn list_items(self, query: ItemsQuery) -> Vec<DemoItem> {
        let len = self.items.len();
        let start = (*query.skip()).min(len);
        let end = slice_end(*query.skip(), *query.limit(), len);
        if end <= start {
            return vec![];
        }
        self.items[start..end].to_vec()
    }

    /// Creates a new item from the client-provided `new` data.
    ///
    /// The item is not stored anywhere: it is returned with all derived fields filled in.
    pub(crate) fn create_item(self, new: NewItem) -> Item {
        Item::from(new)
    }

    /// Gets the details of the item `item_id` as selected by `query`.
    pub(crate) fn get_item(self, item_id: String, query: ItemQuery) -> ItemDetails {
        let description = if *query.full() { Some(LONG_DESCRIPTION.to_owned()) } else { None };
        ItemDetails::new(item_id, query.q().clone(), description)
    }

    /// Replaces the item `item_id` with `new` and echoes back the search string `q`.
    pub(crate) fn update_item(
        self,
        item_id: String,
        new: NewItem,
        q: Option<String>,
    ) -> UpdatedItem {
        UpdatedItem::new(item_id, Item::from(new), q.filter(|q| !q.is_empty()))
    }
}
