use std::path::PathBuf;

use notify::{Event, EventKind};

/// Filesystem change as the dispatcher understands it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileEvent {
    Created(PathBuf),
    Modified(PathBuf),
    Removed(PathBuf),
}

/// Flatten one notify event into dispatcher events. A single notification may
/// carry several paths; access and other kinds carry no content change and
/// are dropped.
pub fn map_notify_event(event: Event) -> Vec<FileEvent> {
    let constructor: fn(PathBuf) -> FileEvent = match event.kind {
        EventKind::Create(_) => FileEvent::Created,
        EventKind::Modify(_) => FileEvent::Modified,
        EventKind::Remove(_) => FileEvent::Removed,
        _ => return Vec::new(),
    };

    event.paths.into_iter().map(constructor).collect()
}

#[cfg(test)]
mod tests {
    use notify::event::{AccessKind, CreateKind, ModifyKind, RemoveKind};

    use super::*;

    #[test]
    fn test_create_modify_remove_are_mapped() {
        let path = PathBuf::from("/watched/notes.txt");

        let created = Event::new(EventKind::Create(CreateKind::File)).add_path(path.clone());
        assert_eq!(
            map_notify_event(created),
            vec![FileEvent::Created(path.clone())]
        );

        let modified =
            Event::new(EventKind::Modify(ModifyKind::Any)).add_path(path.clone());
        assert_eq!(
            map_notify_event(modified),
            vec![FileEvent::Modified(path.clone())]
        );

        let removed = Event::new(EventKind::Remove(RemoveKind::File)).add_path(path.clone());
        assert_eq!(map_notify_event(removed), vec![FileEvent::Removed(path)]);
    }

    #[test]
    fn test_access_events_are_dropped() {
        let event = Event::new(EventKind::Access(AccessKind::Any))
            .add_path(PathBuf::from("/watched/notes.txt"));

        assert!(map_notify_event(event).is_empty());
    }

    #[test]
    fn test_multi_path_event_fans_out() {
        let event = Event::new(EventKind::Remove(RemoveKind::Any))
            .add_path(PathBuf::from("/watched/a.txt"))
            .add_path(PathBuf::from("/watched/b.txt"));

        assert_eq!(map_notify_event(event).len(), 2);
    }
}
