//! Locally previewed media for the registration form.
//!
//! Nothing here is uploaded. Each file is paired with a preview handle (an
//! object URL in the browser); the two live in parallel vectors that must stay
//! the same length with matching positions after every add or remove.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Photos,
    Videos,
}

impl MediaKind {
    pub fn accept(self) -> &'static str {
        match self {
            MediaKind::Photos => "image/*",
            MediaKind::Videos => "video/*",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AttachmentList<F, P> {
    files: Vec<F>,
    previews: Vec<P>,
}

impl<F, P> Default for AttachmentList<F, P> {
    fn default() -> Self {
        Self {
            files: Vec::new(),
            previews: Vec::new(),
        }
    }
}

impl<F, P> AttachmentList<F, P> {
    pub fn len(&self) -> usize {
        debug_assert_eq!(self.files.len(), self.previews.len());
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Appends in selection order.
    pub fn extend(&mut self, items: impl IntoIterator<Item = (F, P)>) {
        for (file, preview) in items {
            self.files.push(file);
            self.previews.push(preview);
        }
    }

    /// Splices the same position out of both vectors. Out of range is a no-op.
    pub fn remove(&mut self, index: usize) -> Option<(F, P)> {
        if index >= self.files.len() {
            return None;
        }
        Some((self.files.remove(index), self.previews.remove(index)))
    }

    #[cfg(test)]
    pub fn files(&self) -> &[F] {
        &self.files
    }

    #[cfg(test)]
    pub fn previews(&self) -> &[P] {
        &self.previews
    }

    pub fn iter(&self) -> impl Iterator<Item = (&F, &P)> {
        self.files.iter().zip(self.previews.iter())
    }
}

/// Logo, photos and videos attached to one draft.
#[derive(Debug, Clone, PartialEq)]
pub struct MediaAttachments<F, P> {
    logo: Option<(F, P)>,
    photos: AttachmentList<F, P>,
    videos: AttachmentList<F, P>,
}

impl<F, P> Default for MediaAttachments<F, P> {
    fn default() -> Self {
        Self {
            logo: None,
            photos: AttachmentList::default(),
            videos: AttachmentList::default(),
        }
    }
}

impl<F, P> MediaAttachments<F, P> {
    /// Single slot. Returns the replaced pair so the caller decides when it drops.
    pub fn set_logo(&mut self, file: F, preview: P) -> Option<(F, P)> {
        self.logo.replace((file, preview))
    }

    pub fn clear_logo(&mut self) -> Option<(F, P)> {
        self.logo.take()
    }

    pub fn logo(&self) -> Option<&(F, P)> {
        self.logo.as_ref()
    }

    pub fn list(&self, kind: MediaKind) -> &AttachmentList<F, P> {
        match kind {
            MediaKind::Photos => &self.photos,
            MediaKind::Videos => &self.videos,
        }
    }

    pub fn list_mut(&mut self, kind: MediaKind) -> &mut AttachmentList<F, P> {
        match kind {
            MediaKind::Photos => &mut self.photos,
            MediaKind::Videos => &mut self.videos,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list_of(n: usize) -> AttachmentList<String, String> {
        let mut list = AttachmentList::default();
        list.extend((0..n).map(|i| (format!("file-{i}"), format!("blob:preview-{i}"))));
        list
    }

    fn aligned(list: &AttachmentList<String, String>) -> bool {
        list.files().len() == list.previews().len()
            && list.iter().all(|(f, p)| {
                f.trim_start_matches("file-") == p.trim_start_matches("blob:preview-")
            })
    }

    #[test]
    fn removing_any_index_keeps_pairs_aligned() {
        for n in 1..6 {
            for i in 0..n {
                let mut list = list_of(n);
                let (f, p) = list.remove(i).expect("in range");
                assert_eq!(f, format!("file-{i}"));
                assert_eq!(p, format!("blob:preview-{i}"));
                assert_eq!(list.files().len(), n - 1);
                assert_eq!(list.previews().len(), n - 1);
                assert!(aligned(&list), "n={n} i={i}");
            }
        }
    }

    #[test]
    fn out_of_range_remove_changes_nothing() {
        let mut list = list_of(2);
        assert_eq!(list.remove(2), None);
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn later_selections_append() {
        let mut list = list_of(2);
        list.extend([("file-2".to_string(), "blob:preview-2".to_string())]);
        assert_eq!(list.files(), ["file-0", "file-1", "file-2"]);
        assert!(aligned(&list));
    }

    #[test]
    fn logo_is_a_single_slot() {
        let mut media: MediaAttachments<&str, &str> = MediaAttachments::default();
        assert_eq!(media.set_logo("a.png", "blob:a"), None);
        assert_eq!(media.set_logo("b.png", "blob:b"), Some(("a.png", "blob:a")));
        assert_eq!(media.logo(), Some(&("b.png", "blob:b")));
        assert_eq!(media.clear_logo(), Some(("b.png", "blob:b")));
        assert_eq!(media.logo(), None);
    }

    #[test]
    fn photos_and_videos_are_independent() {
        let mut media: MediaAttachments<&str, &str> = MediaAttachments::default();
        media.list_mut(MediaKind::Photos).extend([("p.jpg", "blob:p")]);
        media.list_mut(MediaKind::Videos).extend([("v.mp4", "blob:v"), ("w.mp4", "blob:w")]);
        media.list_mut(MediaKind::Videos).remove(0);

        assert_eq!(media.list(MediaKind::Photos).files(), ["p.jpg"]);
        assert_eq!(media.list(MediaKind::Videos).previews(), ["blob:w"]);
    }
}
