pub mod sys_cache;
