mod paging;
mod selection;
