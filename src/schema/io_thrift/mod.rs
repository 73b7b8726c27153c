mod from_thrift;
mod to_thrift;
