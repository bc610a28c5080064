/// State machine behind every entity collection:
/// `idle → loading → {populated, error}`.
///
/// The struct is deliberately free of browser types so the transitions can
/// be tested on the host. The Yew binding lives in `hooks::use_resource`.
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceState<T> {
    /// Cached collection. Fully replaced on each successful fetch; kept
    /// untouched (stale but available) when a fetch fails.
    pub items: Vec<T>,
    pub loading: bool,
    pub error: Option<String>,
    /// True while a create/update/delete is in flight.
    pub saving: bool,
    pub save_error: Option<String>,
    /// Incremented on every successful mutation, so consumers can react to
    /// "something was saved" without a terminal submitted state.
    pub saved_seq: u32,
}

impl<T> Default for ResourceState<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            loading: false,
            error: None,
            saving: false,
            save_error: None,
            saved_seq: 0,
        }
    }
}

impl<T> ResourceState<T> {
    /// Re-entrancy guard: returns false (and changes nothing) while a fetch
    /// is already in flight, so multiple mounted consumers trigger a single
    /// request.
    pub fn begin_fetch(&mut self) -> bool {
        if self.loading {
            return false;
        }
        self.loading = true;
        true
    }

    /// Apply a fetch result: full replacement on success, previous
    /// collection preserved on failure.
    pub fn finish_fetch(&mut self, resultado: Result<Vec<T>, String>) {
        self.loading = false;
        match resultado {
            Ok(items) => {
                self.items = items;
                self.error = None;
            }
            Err(mensaje) => {
                self.error = Some(mensaje);
            }
        }
    }

    /// Guard against double submissions (double-clicks race the disabled
    /// attribute on the submit control).
    pub fn begin_save(&mut self) -> bool {
        if self.saving {
            return false;
        }
        self.saving = true;
        self.save_error = None;
        true
    }

    pub fn finish_save(&mut self, resultado: Result<(), String>) {
        self.saving = false;
        match resultado {
            Ok(()) => self.saved_seq += 1,
            Err(mensaje) => self.save_error = Some(mensaje),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_is_not_reentrant() {
        let mut estado = ResourceState::<i64>::default();
        assert!(estado.begin_fetch());
        // A second consumer mounting while the first fetch is in flight
        // must not trigger another request.
        assert!(!estado.begin_fetch());
        estado.finish_fetch(Ok(vec![1]));
        assert!(estado.begin_fetch());
    }

    #[test]
    fn test_fetch_replaces_collection() {
        let mut estado = ResourceState::<i64>::default();
        estado.begin_fetch();
        estado.finish_fetch(Ok(vec![1, 2, 3]));
        estado.begin_fetch();
        estado.finish_fetch(Ok(vec![4]));
        assert_eq!(estado.items, vec![4]);
        assert_eq!(estado.error, None);
        assert!(!estado.loading);
    }

    #[test]
    fn test_failed_fetch_keeps_stale_collection() {
        let mut estado = ResourceState::<i64>::default();
        estado.begin_fetch();
        estado.finish_fetch(Ok(vec![1, 2]));
        estado.begin_fetch();
        estado.finish_fetch(Err("Error 500: Internal Server Error".to_string()));
        assert_eq!(estado.items, vec![1, 2]);
        assert_eq!(
            estado.error.as_deref(),
            Some("Error 500: Internal Server Error")
        );
    }

    #[test]
    fn test_error_clears_on_next_success() {
        let mut estado = ResourceState::<i64>::default();
        estado.begin_fetch();
        estado.finish_fetch(Err("falló".to_string()));
        estado.begin_fetch();
        estado.finish_fetch(Ok(vec![7]));
        assert_eq!(estado.error, None);
        assert_eq!(estado.items, vec![7]);
    }

    #[test]
    fn test_save_guard_and_sequence() {
        let mut estado = ResourceState::<i64>::default();
        assert!(estado.begin_save());
        assert!(!estado.begin_save());
        estado.finish_save(Ok(()));
        assert_eq!(estado.saved_seq, 1);
        assert!(estado.begin_save());
        estado.finish_save(Err("El nombre ya existe".to_string()));
        assert_eq!(estado.saved_seq, 1);
        assert_eq!(estado.save_error.as_deref(), Some("El nombre ya existe"));
    }
}
