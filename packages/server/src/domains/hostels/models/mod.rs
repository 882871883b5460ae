pub mod allocation;

pub use allocation::{
    AllocationChanges, HostelAllocation, HostelStatus, NewAllocation, RoomType, UNASSIGNED_ROOM,
};
