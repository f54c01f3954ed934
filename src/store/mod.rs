pub mod backend;
pub mod sftp;

pub use backend::{Connector, EntryKind, RemoteEntry, RemoteStore};
pub use sftp::{SftpConnector, SftpStore};
