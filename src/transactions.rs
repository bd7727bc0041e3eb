use std::{fs, marker::PhantomData, path::PathBuf};

/// Something an export created and would have to undo.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RollbackOperation {
    RemoveFile(PathBuf),
    /// Only directories the export itself created are recorded.
    RemoveDir(PathBuf),
}
/// Active Transaction
pub struct Active;
/// Committed Transaction
pub struct Committed;
/// Canceled Transaction
pub struct Canceled;
/// A trait that tells us if rollback should occur when dropped.
pub trait TransactionState {
    const SHOULD_ROLLBACK: bool;
}
impl TransactionState for Active {
    const SHOULD_ROLLBACK: bool = true;
}
impl TransactionState for Committed {
    const SHOULD_ROLLBACK: bool = false;
}
impl TransactionState for Canceled {
    const SHOULD_ROLLBACK: bool = true;
}
/// How an export ended: written for good, or declined by the user.
pub enum FinalTransactionState {
    Committed(Transaction<Committed>),
    Canceled(Transaction<Canceled>),
}
impl FinalTransactionState {
    pub fn is_committed(&self) -> bool {
        matches!(self, Self::Committed(_))
    }
}
/// Tracks what an export wrote so a failure part-way through leaves the
/// destination as it was.
///
/// A `Transaction<Active>` that is dropped (for instance because `?` returned
/// early) undoes every recorded operation, newest first. `commit` keeps the
/// writes; `cancel` undoes them immediately on drop of the returned value.
pub struct Transaction<State: TransactionState> {
    rollback_operations: Vec<RollbackOperation>,
    state: PhantomData<State>,
}
impl Default for Transaction<Active> {
    fn default() -> Self {
        Self::new()
    }
}
impl Transaction<Active> {
    pub fn new() -> Self {
        Transaction {
            rollback_operations: vec![],
            state: PhantomData,
        }
    }

    pub fn add_operation(&mut self, operation: RollbackOperation) {
        self.rollback_operations.push(operation);
    }

    pub fn operations(&self) -> &[RollbackOperation] {
        &self.rollback_operations
    }

    pub fn commit(mut self) -> Transaction<Committed> {
        self.rollback_operations.clear();

        Transaction {
            rollback_operations: vec![],
            state: PhantomData,
        }
    }

    pub fn cancel(mut self) -> Transaction<Canceled> {
        let rollback_operations = std::mem::take(&mut self.rollback_operations);

        Transaction {
            rollback_operations,
            state: PhantomData,
        }
    }
}
impl<S: TransactionState> Drop for Transaction<S> {
    fn drop(&mut self) {
        if S::SHOULD_ROLLBACK && !self.rollback_operations.is_empty() {
            log::debug!("rolling back {} operations", self.rollback_operations.len());
            while let Some(operation) = self.rollback_operations.pop() {
                match operation {
                    RollbackOperation::RemoveDir(path) => {
                        log::debug!("removing dir: {}", path.display());
                        let _ = fs::remove_dir(&path);
                    }
                    RollbackOperation::RemoveFile(path) => {
                        log::debug!("removing file: {}", path.display());
                        let _ = fs::remove_file(&path);
                    }
                }
            }
        } else if !S::SHOULD_ROLLBACK {
            log::debug!("export committed");
        }
    }
}
