mod end_to_end;
mod properties;
mod test_utils;
